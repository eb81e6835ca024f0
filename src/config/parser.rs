use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use scopecrawl::config::load_config;
///
/// let config = load_config(Path::new("scopecrawl.toml")).unwrap();
/// println!("Workers: {}", config.crawler.max_workers);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a report can be traced back to the exact
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
domains = ["example.com", "example.org"]

[crawler]
max-workers = 4
max-time = 120
max-path-depth = 5
max-crawl-depth = 10
breadth-first-search = false
valid-external-domains = ["github.com", "gitlab.com"]

[crawler.headers]
User-Agent = "TestAgent/1.0"

[output]
results-dir = "./out"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.domains.len(), 2);
        assert_eq!(config.crawler.max_workers, 4);
        assert_eq!(config.crawler.max_time, 120);
        assert_eq!(config.crawler.max_path_depth, 5);
        assert_eq!(config.crawler.max_crawl_depth, 10);
        assert!(!config.crawler.breadth_first_search);
        assert_eq!(config.crawler.valid_external_domains.len(), 2);
        assert_eq!(
            config.crawler.headers.get("User-Agent").map(String::as_str),
            Some("TestAgent/1.0")
        );
        assert_eq!(config.output.results_dir, "./out");
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = parse_config(r#"domains = ["example.com"]"#).unwrap();

        assert_eq!(config.crawler.max_workers, 2);
        assert_eq!(config.crawler.max_time, 60);
        assert_eq!(config.crawler.max_path_depth, 3);
        assert_eq!(config.crawler.max_crawl_depth, 15);
        assert!(config.crawler.breadth_first_search);
        assert_eq!(config.crawler.valid_external_domains, vec!["github.com"]);
        assert!(config
            .crawler
            .allowed_file_extensions
            .contains(&".js".to_string()));
        assert!(config
            .crawler
            .sensitive_patterns
            .contains(&"dashboard".to_string()));
        assert!(config.crawler.headers.contains_key("User-Agent"));
        assert_eq!(config.output.results_dir, "results");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
domains = ["example.com"]

[crawler]
max-path-depth = 21
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = parse_config(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.domains, vec!["example.com"]);
        assert_eq!(config.crawler.max_workers, 2);
    }
}
