//! Crawler module for the concurrent crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The frontier of pending targets (FIFO or LIFO)
//! - Shared state and the worker termination protocol
//! - The worker loop (fetch, extract, classify, enqueue)
//! - The HTTP transport behind the `Fetcher` seam
//! - Overall crawl coordination and seeding

mod coordinator;
mod fetcher;
mod frontier;
mod scheduler;
mod worker;

pub use coordinator::{initial_targets, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, Fetcher, HttpFetcher};
pub use frontier::{CrawlTarget, Discipline, Frontier, FrontierItem};
pub use scheduler::CrawlerState;
pub use worker::{run_worker, CrawlContext};
