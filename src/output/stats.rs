//! Console summary of a finished crawl

use super::report::CrawlReport;
use crate::state::VisitLabel;
use std::collections::BTreeMap;

/// Counts derived from a report for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    pub total_urls: usize,
    pub successful: usize,
    pub unsuccessful: usize,
    pub not_requested: usize,
    /// Records per label, in label order
    pub by_label: BTreeMap<&'static str, usize>,
    /// Deepest recorded depth
    pub max_depth: u32,
}

impl CrawlStatistics {
    pub fn from_report(report: &CrawlReport) -> Self {
        let buckets = &report.urls;
        let mut stats = Self {
            total_urls: report.number_of_urls,
            successful: buckets.successful_requests.len(),
            unsuccessful: buckets.unsuccessful_requests.len(),
            not_requested: buckets.not_requested.len(),
            ..Self::default()
        };

        let all = buckets
            .successful_requests
            .iter()
            .chain(&buckets.unsuccessful_requests)
            .chain(&buckets.not_requested);
        for (_, record) in all {
            *stats.by_label.entry(record.label.as_str()).or_insert(0) += 1;
            stats.max_depth = stats.max_depth.max(record.depth);
        }

        stats
    }

    pub fn label_count(&self, label: VisitLabel) -> usize {
        self.by_label.get(label.as_str()).copied().unwrap_or(0)
    }
}

/// Prints a short summary of one crawl to stdout
pub fn print_summary(report: &CrawlReport) {
    let stats = CrawlStatistics::from_report(report);

    println!("=== {} ===", report.domain);
    println!("  Stop reason: {}", report.stop_reason);
    println!("  Crawling time: {:.1}s", report.crawling_time);
    println!("  URLs recorded: {}", stats.total_urls);
    println!("    successful: {}", stats.successful);
    println!("    unsuccessful: {}", stats.unsuccessful);
    println!("    not requested: {}", stats.not_requested);
    if !stats.by_label.is_empty() {
        println!("  By label:");
        for (label, count) in &stats.by_label {
            println!("    {}: {}", label, count);
        }
    }
    println!("  Deepest record: {}", stats.max_depth);
    println!();
}
