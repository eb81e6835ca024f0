//! Crawler coordinator - orchestration of one crawl
//!
//! This module ties the pieces together for a single target domain:
//! - Validating the configuration before any network activity
//! - Seeding the frontier and the dedup set
//! - Spawning the worker pool and waiting for every worker
//! - Turning the result store into a [`CrawlReport`]

use super::fetcher::{Fetcher, HttpFetcher};
use super::frontier::{CrawlTarget, Discipline, FrontierItem};
use super::scheduler::CrawlerState;
use super::worker::{run_worker, CrawlContext};
use crate::config::{validate_crawler_config, validate_domain, CrawlerConfig};
use crate::output::CrawlReport;
use crate::state::StopReason;
use crate::storage::{DedupSet, ResultStore};
use crate::url::heuristics::PRIVILEGED_SUBDOMAINS;
use crate::url::{Extension, Scope};
use crate::ConfigResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Builds the depth-0 targets for `domain`
///
/// The site root, its robots.txt and sitemap.xml are always seeded. When the
/// registered domain is known, a few commonly exposed subdomains of it are
/// guessed as well.
pub fn initial_targets(domain: &str, registered_domain: &str) -> Vec<CrawlTarget> {
    let mut seeds = vec![
        CrawlTarget::new(format!("https://{}/", domain), 0, Some(Extension::Html)),
        CrawlTarget::new(
            format!("https://{}/robots.txt", domain),
            0,
            Some(Extension::Other("txt".to_string())),
        ),
        CrawlTarget::new(
            format!("https://{}/sitemap.xml", domain),
            0,
            Some(Extension::Other("xml".to_string())),
        ),
    ];

    if !registered_domain.is_empty() {
        seeds.extend(PRIVILEGED_SUBDOMAINS.iter().map(|sub| {
            CrawlTarget::new(
                format!("https://{}.{}", sub, registered_domain),
                0,
                Some(Extension::Html),
            )
        }));
    }

    seeds
}

/// One crawl of one domain
#[derive(Debug, Clone)]
pub struct Crawler {
    config: CrawlerConfig,
    scope: Scope,
    seeds: Vec<CrawlTarget>,
}

impl Crawler {
    /// Creates a crawler for `domain`
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(ConfigError)` - The domain or the configuration is invalid
    pub fn new(domain: &str, config: CrawlerConfig) -> ConfigResult<Self> {
        validate_domain(domain)?;
        validate_crawler_config(&config)?;

        let scope = Scope::new(domain, &config);
        let seeds = initial_targets(domain, scope.registered_domain());

        Ok(Self {
            config,
            scope,
            seeds,
        })
    }

    /// Replaces the default seeds
    pub fn with_seeds(mut self, seeds: Vec<CrawlTarget>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn domain(&self) -> &str {
        self.scope.domain()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    pub fn seeds(&self) -> &[CrawlTarget] {
        &self.seeds
    }

    /// Crawls over HTTP using the configured headers
    pub async fn run(&self) -> crate::Result<CrawlReport> {
        let fetcher = HttpFetcher::new(&self.config.headers)?;
        Ok(self.run_with(fetcher).await)
    }

    /// Crawls using `fetcher` as the transport
    ///
    /// Returns once every worker has exited. A panicking worker is logged
    /// and counted as exited.
    pub async fn run_with<F: Fetcher>(&self, fetcher: F) -> CrawlReport {
        let workers = self.config.max_workers as usize;
        let ctx = Arc::new(CrawlContext {
            scope: self.scope.clone(),
            max_crawl_depth: self.config.max_crawl_depth,
            state: CrawlerState::new(
                Discipline::from_breadth_first(self.config.breadth_first_search),
                workers,
                Duration::from_secs(self.config.max_time),
            ),
            dedup: DedupSet::new(),
            results: ResultStore::new(),
            fetcher,
        });

        for seed in &self.seeds {
            ctx.dedup.accept(&seed.url);
            if let Some(canonical) = seed.url.strip_suffix('/') {
                ctx.dedup.accept(canonical);
            }
            ctx.state.enqueue(FrontierItem::Target(seed.clone()));
        }

        info!(
            domain = self.domain(),
            workers,
            seeds = self.seeds.len(),
            max_time = self.config.max_time,
            "starting crawl"
        );

        let handles: Vec<_> = (0..workers)
            .map(|id| tokio::spawn(run_worker(id, Arc::clone(&ctx))))
            .collect();

        for (id, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                warn!(worker = id, error = %e, "worker task failed");
            }
        }

        let stop_reason = ctx.state.stop_reason().unwrap_or(StopReason::Undefined);
        let report = CrawlReport::new(
            self.domain(),
            stop_reason,
            ctx.state.elapsed(),
            ctx.results.snapshot(),
        );

        info!(
            domain = self.domain(),
            %stop_reason,
            urls = report.number_of_urls,
            seconds = report.crawling_time,
            "crawl finished"
        );

        report
    }
}
