use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};

/// Upper bound shared by the path depth and crawl depth limits
const MAX_DEPTH_LIMIT: u32 = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.domains.is_empty() {
        return Err(ConfigError::Validation(
            "at least one domain must be configured".to_string(),
        ));
    }

    for domain in &config.domains {
        validate_domain(domain)?;
    }

    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
pub fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be > 0, got {}",
            config.max_workers
        )));
    }

    if config.max_time < 1 {
        return Err(ConfigError::Validation(format!(
            "max_time must be > 0 seconds, got {}",
            config.max_time
        )));
    }

    if !(1..=MAX_DEPTH_LIMIT).contains(&config.max_path_depth) {
        return Err(ConfigError::Validation(format!(
            "max_path_depth must be between 1 and {}, got {}",
            MAX_DEPTH_LIMIT, config.max_path_depth
        )));
    }

    if !(1..=MAX_DEPTH_LIMIT).contains(&config.max_crawl_depth) {
        return Err(ConfigError::Validation(format!(
            "max_crawl_depth must be between 1 and {}, got {}",
            MAX_DEPTH_LIMIT, config.max_crawl_depth
        )));
    }

    for extension in &config.allowed_file_extensions {
        if !extension.is_empty() && !extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "allowed file extension '{}' must be empty or start with '.'",
                extension
            )));
        }
    }

    if config.sensitive_patterns.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "sensitive patterns cannot be empty strings".to_string(),
        ));
    }

    if config.valid_external_domains.iter().any(|d| d.is_empty()) {
        return Err(ConfigError::Validation(
            "valid external domains cannot be empty strings".to_string(),
        ));
    }

    validate_headers(config)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that every configured header can actually be sent
fn validate_headers(config: &CrawlerConfig) -> Result<(), ConfigError> {
    for (name, value) in &config.headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::InvalidHeader(format!("'{}': {}", name, e)))?;
        HeaderValue::from_str(value)
            .map_err(|e| ConfigError::InvalidHeader(format!("value of '{}': {}", name, e)))?;
    }
    Ok(())
}

/// Validates a crawl target domain
pub fn validate_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "Domain cannot be empty".to_string(),
        ));
    }

    // Check for invalid characters
    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    // Check that it doesn't start or end with a dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    // Check for consecutive dots
    if domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    // Must contain at least one dot (e.g., example.com, not just "example")
    if !domain.contains('.') {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
