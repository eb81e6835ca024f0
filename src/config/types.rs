use crate::url::heuristics;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for Scopecrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Target domains, crawled one after another
    #[serde(default)]
    pub domains: Vec<String>,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Per-crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Headers sent with every request
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,

    /// Path substrings that let a too-deep page through anyway
    #[serde(rename = "sensitive-patterns", default = "default_sensitive_patterns")]
    pub sensitive_patterns: Vec<String>,

    /// File extensions (with leading dot, "" for none) worth following
    #[serde(
        rename = "allowed-file-extensions",
        default = "default_allowed_file_extensions"
    )]
    pub allowed_file_extensions: Vec<String>,

    /// Number of concurrent workers
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: u32,

    /// Wall-clock budget for one crawl (seconds)
    #[serde(rename = "max-time", default = "default_max_time")]
    pub max_time: u64,

    /// Substrings that make an off-domain URL worth following
    #[serde(
        rename = "valid-external-domains",
        default = "default_valid_external_domains"
    )]
    pub valid_external_domains: Vec<String>,

    /// Maximum number of path segments for ordinary pages
    #[serde(rename = "max-path-depth", default = "default_max_path_depth")]
    pub max_path_depth: u32,

    /// Maximum number of link hops from a seed
    #[serde(rename = "max-crawl-depth", default = "default_max_crawl_depth")]
    pub max_crawl_depth: u32,

    /// FIFO frontier when true, LIFO when false
    #[serde(rename = "breadth-first-search", default = "default_true")]
    pub breadth_first_search: bool,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one `<domain>_results.json` per crawl
    #[serde(rename = "results-dir", default = "default_results_dir")]
    pub results_dir: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            headers: default_headers(),
            sensitive_patterns: default_sensitive_patterns(),
            allowed_file_extensions: default_allowed_file_extensions(),
            max_workers: default_max_workers(),
            max_time: default_max_time(),
            valid_external_domains: default_valid_external_domains(),
            max_path_depth: default_max_path_depth(),
            max_crawl_depth: default_max_crawl_depth(),
            breadth_first_search: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "User-Agent".to_string(),
        heuristics::DEFAULT_USER_AGENT.to_string(),
    )])
}

fn default_sensitive_patterns() -> Vec<String> {
    heuristics::SENSITIVE_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_allowed_file_extensions() -> Vec<String> {
    heuristics::ALLOWED_FILE_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_valid_external_domains() -> Vec<String> {
    heuristics::VALID_EXTERNAL_DOMAINS
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_max_workers() -> u32 {
    2
}

fn default_max_time() -> u64 {
    60
}

fn default_max_path_depth() -> u32 {
    3
}

fn default_max_crawl_depth() -> u32 {
    15
}

fn default_true() -> bool {
    true
}

fn default_results_dir() -> String {
    "results".to_string()
}
