//! Scopecrawl: a bounded-scope attack-surface crawler
//!
//! This crate explores the pages and scripts reachable from a target domain,
//! within configured time, depth and path limits, and records what it found.
//! Discovered strings are resolved, classified and filtered before they are
//! ever queued, and a pool of concurrent workers drains the frontier until
//! the crawl runs out of time, runs out of work, or gets rate limited.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Scopecrawl operations
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Result type alias for Scopecrawl operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlerConfig};
pub use crawler::Crawler;
pub use output::CrawlReport;
pub use state::{StopReason, VisitLabel, VisitedRecord};
pub use crate::url::{registered_domain, Scope};
