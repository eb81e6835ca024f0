//! Crawl report and its JSON form
//!
//! Records are split into three buckets by status and ordered by URL length,
//! so the shortest (usually most interesting) endpoints come first.

use crate::state::{StopReason, VisitedRecord};
use serde::ser::Serializer;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Records of one bucket, already in report order
pub type Bucket = Vec<(String, VisitedRecord)>;

/// Outcome records partitioned by status
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportBuckets {
    /// Status below 300
    #[serde(serialize_with = "serialize_bucket")]
    pub successful_requests: Bucket,

    /// Any other real status, including transport failures (400)
    #[serde(serialize_with = "serialize_bucket")]
    pub unsuccessful_requests: Bucket,

    /// Found at the depth limit and never requested (900)
    #[serde(serialize_with = "serialize_bucket")]
    pub not_requested: Bucket,
}

impl ReportBuckets {
    /// Sorts records by URL length (then text) and splits them by status
    pub fn partition(mut records: Vec<(String, VisitedRecord)>) -> Self {
        records.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let mut buckets = Self::default();
        for (url, record) in records {
            if record.is_successful() {
                buckets.successful_requests.push((url, record));
            } else if record.is_not_requested() {
                buckets.not_requested.push((url, record));
            } else {
                buckets.unsuccessful_requests.push((url, record));
            }
        }
        buckets
    }

    pub fn len(&self) -> usize {
        self.successful_requests.len() + self.unsuccessful_requests.len() + self.not_requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn serialize_bucket<S: Serializer>(bucket: &Bucket, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(bucket.iter().map(|(url, record)| (url, record)))
}

/// Everything known about one finished crawl
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlReport {
    pub domain: String,
    pub stop_reason: StopReason,
    /// Wall-clock seconds, rounded to one decimal
    pub crawling_time: f64,
    pub number_of_urls: usize,
    pub urls: ReportBuckets,
}

impl CrawlReport {
    pub fn new(
        domain: &str,
        stop_reason: StopReason,
        elapsed: Duration,
        records: Vec<(String, VisitedRecord)>,
    ) -> Self {
        let urls = ReportBuckets::partition(records);
        Self {
            domain: domain.to_string(),
            stop_reason,
            crawling_time: round_tenths(elapsed),
            number_of_urls: urls.len(),
            urls,
        }
    }

    /// Pretty JSON with a one-space indent
    pub fn to_json(&self) -> crate::Result<String> {
        let mut out = Vec::new();
        self.write_json(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn write_json<W: Write>(&self, writer: W) -> crate::Result<()> {
        let formatter = PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }
}

fn round_tenths(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 10.0).round() / 10.0
}

/// Path of the report file for `domain` inside `results_dir`
pub fn report_path(results_dir: &Path, domain: &str) -> PathBuf {
    results_dir.join(format!("{}_results.json", domain))
}

/// Writes `{results_dir}/{domain}_results.json`, creating the directory if needed
pub fn write_report(report: &CrawlReport, results_dir: &Path) -> crate::Result<PathBuf> {
    fs::create_dir_all(results_dir)?;
    let path = report_path(results_dir, &report.domain);

    let mut writer = BufWriter::new(File::create(&path)?);
    report.write_json(&mut writer)?;
    writer.flush()?;

    Ok(path)
}
