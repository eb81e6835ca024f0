//! URL handling module for Scopecrawl
//!
//! This module turns arbitrary strings found in fetched bodies into
//! canonical, policy-filtered crawl targets. Classification is an ordered
//! chain of stages, each one usable and testable on its own:
//!
//! 1. [`sanitize`] - discard strings that cannot be URLs
//! 2. [`canonicalize`] - strip fragments and wildcards, complete `//` links
//! 3. [`resolve`] - make the URL absolute and decide its locality
//! 4. [`policy`] - apply the local or external acceptance policy

mod domain;
pub mod heuristics;
mod path;
pub mod policy;
mod resolve;

use crate::config::CrawlerConfig;
use std::fmt;
use thiserror::Error;

// Re-export main functions
pub use domain::{extract_host, registered_domain, registered_domain_of};
pub use path::{file_extension, path_and_extension, path_depth};
pub use resolve::{canonicalize, resolve, sanitize, Candidate};

/// Whether a URL belongs to the crawled site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locality {
    /// Same registered domain as the crawl target (subdomains included)
    Local,
    /// Any other host
    External,
}

/// Content hint carried by a crawl target, used to pick an extractor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extension {
    /// A page: no extension, `.html` or `.htm`
    Html,
    /// A `.js` file
    Script,
    /// Any other extension, stored without its leading dot
    Other(String),
}

impl Extension {
    /// Maps a file suffix such as `".js"` to an extension, `None` for `""`
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => None,
            ".html" | ".htm" => Some(Self::Html),
            ".js" => Some(Self::Script),
            other => Some(Self::Other(other.trim_start_matches('.').to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Html => "html",
            Self::Script => "script",
            Self::Other(ext) => ext,
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered string that passed every classification stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUrl {
    /// Canonical absolute URL, the dedup and storage key
    pub url: String,
    pub locality: Locality,
    pub extension: Option<Extension>,
}

/// Why a discovered string was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("length {0} is outside 3..=300")]
    Length(usize),

    #[error("contains whitespace")]
    Whitespace,

    #[error("mail link")]
    MailLink,

    #[error("nothing left after canonicalization")]
    Empty,

    #[error("cannot be parsed as a URL")]
    Unparseable,

    #[error("extension '{0}' is not allow-listed")]
    DisallowedExtension(String),

    #[error("path depth {depth} exceeds {max} and no sensitive pattern matched")]
    TooDeep { depth: usize, max: usize },

    #[error("common library script")]
    VendorScript,

    #[error("external domain is not allowed")]
    ExternalNotAllowed,
}

/// The boundaries of one crawl, and the classifier that enforces them
#[derive(Debug, Clone)]
pub struct Scope {
    domain: String,
    registered_domain: String,
    allowed_file_extensions: Vec<String>,
    sensitive_patterns: Vec<String>,
    max_path_depth: usize,
    valid_external_domains: Vec<String>,
}

impl Scope {
    /// Builds the scope for crawling `domain` under `config`
    pub fn new(domain: &str, config: &CrawlerConfig) -> Self {
        Self {
            domain: domain.to_string(),
            registered_domain: registered_domain(domain),
            allowed_file_extensions: config.allowed_file_extensions.clone(),
            sensitive_patterns: config.sensitive_patterns.clone(),
            max_path_depth: config.max_path_depth as usize,
            valid_external_domains: config.valid_external_domains.clone(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Registered domain of the crawl target, "" if indeterminable
    pub fn registered_domain(&self) -> &str {
        &self.registered_domain
    }

    pub fn max_path_depth(&self) -> usize {
        self.max_path_depth
    }

    /// Exact match against the allow-list
    pub fn allows_extension(&self, suffix: &str) -> bool {
        self.allowed_file_extensions.iter().any(|e| e == suffix)
    }

    /// Plain substring search of the sensitive patterns in `path`
    pub fn has_sensitive_pattern(&self, path: &str) -> bool {
        self.sensitive_patterns
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
    }

    /// Plain substring search of the allowed external domains in `url`
    pub fn is_allowed_external(&self, url: &str) -> bool {
        self.valid_external_domains
            .iter()
            .any(|domain| url.contains(domain.as_str()))
    }

    /// Runs a raw discovered string through the whole pipeline
    ///
    /// # Examples
    ///
    /// ```
    /// use scopecrawl::config::CrawlerConfig;
    /// use scopecrawl::url::{Extension, Scope};
    ///
    /// let scope = Scope::new("example.com", &CrawlerConfig::default());
    /// let accepted = scope.classify("/login#form").unwrap();
    /// assert_eq!(accepted.url, "https://example.com/login");
    /// assert_eq!(accepted.extension, Some(Extension::Html));
    /// ```
    pub fn classify(&self, raw: &str) -> Result<AcceptedUrl, Rejection> {
        let sanitized = sanitize(raw)?;
        let canonical = canonicalize(sanitized)?;
        let candidate = resolve(canonical, &self.domain, &self.registered_domain)?;

        match candidate.locality {
            Locality::Local => policy::apply_local(candidate, self),
            Locality::External => policy::apply_external(candidate, self),
        }
    }
}
