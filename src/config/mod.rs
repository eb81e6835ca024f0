//! Configuration module for Scopecrawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every value is checked before any network activity takes place.
//!
//! # Example
//!
//! ```no_run
//! use scopecrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scopecrawl.toml")).unwrap();
//! println!("Crawler will use max crawl depth: {}", config.crawler.max_crawl_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_crawler_config, validate_domain};
