//! Output module for crawl reports
//!
//! This module handles:
//! - Partitioning recorded outcomes into report buckets
//! - Writing one JSON report per crawled domain
//! - Printing a console summary

mod report;
pub mod stats;

pub use report::{report_path, write_report, Bucket, CrawlReport, ReportBuckets};
pub use stats::{print_summary, CrawlStatistics};
