//! Scopecrawl main entry point
//!
//! This is the command-line interface for the Scopecrawl attack-surface crawler.

use anyhow::{bail, Context};
use clap::Parser;
use scopecrawl::config::{load_config_with_hash, Config};
use scopecrawl::output::{print_summary, write_report};
use scopecrawl::Crawler;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Scopecrawl: a bounded-scope attack-surface crawler
///
/// Scopecrawl explores the pages, scripts and files reachable from each
/// configured domain, within time, depth and path limits, and writes one
/// JSON report per domain.
#[derive(Parser, Debug)]
#[command(name = "scopecrawl")]
#[command(version)]
#[command(about = "A bounded-scope attack-surface crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Only crawl these configured domains (repeatable)
    #[arg(long = "domain", value_name = "DOMAIN")]
    domains: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let domains = select_domains(&config, &cli.domains)?;

    // Build every crawler up front so a bad domain fails the batch before any request
    let crawlers = domains
        .iter()
        .map(|domain| {
            Crawler::new(domain, config.crawler.clone())
                .with_context(|| format!("invalid crawl settings for {}", domain))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if cli.dry_run {
        handle_dry_run(&config, &crawlers);
        return Ok(());
    }

    handle_crawl(&crawlers, Path::new(&config.output.results_dir), cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("scopecrawl=info,warn"),
            1 => EnvFilter::new("scopecrawl=debug,info"),
            2 => EnvFilter::new("scopecrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves `--domain` filters against the configured domains, keeping config order
fn select_domains(config: &Config, requested: &[String]) -> anyhow::Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(config.domains.clone());
    }

    if let Some(unknown) = requested.iter().find(|d| !config.domains.contains(d)) {
        bail!("domain '{}' is not listed in the configuration", unknown);
    }

    Ok(config
        .domains
        .iter()
        .filter(|d| requested.contains(d))
        .cloned()
        .collect())
}

/// Handles the --dry-run mode: shows the effective settings and the seeds
fn handle_dry_run(config: &Config, crawlers: &[Crawler]) {
    let crawler = &config.crawler;

    println!("=== Scopecrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Workers: {}", crawler.max_workers);
    println!("  Time budget: {}s", crawler.max_time);
    println!("  Max path depth: {}", crawler.max_path_depth);
    println!("  Max crawl depth: {}", crawler.max_crawl_depth);
    println!(
        "  Order: {}",
        if crawler.breadth_first_search {
            "breadth-first"
        } else {
            "depth-first"
        }
    );
    println!(
        "  Valid external domains: {}",
        crawler.valid_external_domains.join(", ")
    );
    println!("  Sensitive patterns: {}", crawler.sensitive_patterns.len());
    println!(
        "  Allowed file extensions: {}",
        crawler.allowed_file_extensions.len()
    );

    println!("\nHeaders:");
    for (name, value) in &crawler.headers {
        println!("  {}: {}", name, value);
    }

    println!("\nOutput:");
    println!("  Results directory: {}", config.output.results_dir);

    println!("\nDomains ({}):", crawlers.len());
    for crawler in crawlers {
        let registered = crawler.scope().registered_domain();
        println!(
            "  - {} (registered domain: {})",
            crawler.domain(),
            if registered.is_empty() { "unknown" } else { registered }
        );
        for seed in crawler.seeds() {
            println!("    * {}", seed.url);
        }
    }
}

/// Crawls every domain in order and writes its report
async fn handle_crawl(crawlers: &[Crawler], results_dir: &Path, quiet: bool) -> anyhow::Result<()> {
    for crawler in crawlers {
        tracing::info!("Crawling {}", crawler.domain());

        let report = crawler
            .run()
            .await
            .with_context(|| format!("crawl of {} failed", crawler.domain()))?;

        let path = write_report(&report, results_dir)
            .with_context(|| format!("failed to write report for {}", crawler.domain()))?;
        tracing::info!("Report written to {}", path.display());

        if !quiet {
            print_summary(&report);
        }
    }

    tracing::info!("Finished crawling {} domain(s)", crawlers.len());
    Ok(())
}
