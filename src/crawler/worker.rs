//! Worker loop
//!
//! Each worker repeatedly takes a target, fetches it, records the outcome and
//! feeds every accepted link back into the frontier, until one of the stop
//! conditions fires. Nothing inside the loop can fail the crawl: transport
//! errors are statuses, rejected candidates are just logged.

use super::fetcher::Fetcher;
use super::frontier::{CrawlTarget, FrontierItem};
use super::scheduler::CrawlerState;
use crate::extract::extract_links;
use crate::state::{StopReason, VisitLabel, VisitedRecord};
use crate::storage::{DedupSet, ResultStore};
use crate::url::Scope;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

const TOO_MANY_REQUESTS: u16 = 429;

/// Everything the workers of one run share
#[derive(Debug)]
pub struct CrawlContext<F> {
    pub scope: Scope,
    pub max_crawl_depth: u32,
    pub state: CrawlerState,
    pub dedup: DedupSet,
    pub results: ResultStore,
    pub fetcher: F,
}

enum Flow {
    Continue,
    Stop,
}

/// Runs the exit protocol even if the worker panics
struct ExitGuard<'a> {
    id: usize,
    state: &'a CrawlerState,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        let sentinels = self.state.exit_worker();
        if sentinels > 0 {
            debug!(worker = self.id, sentinels, "first worker out, waking the rest");
        }
        debug!(worker = self.id, "worker exited");
    }
}

/// Drains the frontier until the crawl stops
pub async fn run_worker<F: Fetcher>(id: usize, ctx: Arc<CrawlContext<F>>) {
    let _exit = ExitGuard {
        id,
        state: &ctx.state,
    };
    debug!(worker = id, "worker started");

    loop {
        if ctx.state.timed_out() {
            if ctx.state.stop(StopReason::RanOutOfTime) {
                info!(worker = id, "time budget exhausted");
            }
            break;
        }

        if let Some(reason) = ctx.state.stop_reason() {
            debug!(worker = id, %reason, "stop signal seen");
            break;
        }

        if !ctx.state.enter_wait() {
            debug!(worker = id, "all workers idle and frontier empty");
            break;
        }

        let target = match ctx.state.dequeue().await {
            FrontierItem::Target(target) => target,
            FrontierItem::Sentinel => break,
        };

        if ctx.state.is_stopped() {
            trace!(worker = id, url = %target.url, "dropping target after stop");
            break;
        }

        if let Flow::Stop = visit(id, &ctx, target).await {
            break;
        }
    }
}

async fn visit<F: Fetcher>(id: usize, ctx: &CrawlContext<F>, target: CrawlTarget) -> Flow {
    let outcome = ctx.fetcher.fetch(&target.url).await;
    let depth = target.depth + 1;

    ctx.results
        .record(&target.url, VisitedRecord::crawled(depth, outcome.status));
    debug!(worker = id, url = %target.url, status = outcome.status, depth, "fetched");

    if outcome.status == TOO_MANY_REQUESTS {
        if ctx.state.stop(StopReason::RateLimited) {
            warn!(worker = id, url = %target.url, "rate limited, stopping crawl");
        }
        return Flow::Stop;
    }

    let Some(body) = outcome.body.filter(|b| !b.is_empty()) else {
        ctx.results.relabel(&target.url, VisitLabel::FailedToGetBody);
        return Flow::Continue;
    };

    let candidates = extract_links(&body, &target.url, target.extension.as_ref());
    trace!(worker = id, url = %target.url, found = candidates.len(), "extracted candidates");

    for raw in &candidates {
        admit(ctx, raw, depth);
    }

    Flow::Continue
}

/// Classifies one candidate and, if new, either queues it or records it as too deep
fn admit<F>(ctx: &CrawlContext<F>, raw: &str, depth: u32) {
    let accepted = match ctx.scope.classify(raw) {
        Ok(accepted) => accepted,
        Err(rejection) => {
            trace!(candidate = raw, %rejection, "rejected");
            return;
        }
    };

    if !ctx.dedup.accept(&accepted.url) {
        return;
    }

    if depth >= ctx.max_crawl_depth {
        ctx.results
            .record(&accepted.url, VisitedRecord::max_depth_reached(depth));
    } else {
        ctx.state.enqueue(FrontierItem::Target(CrawlTarget::new(
            accepted.url,
            depth,
            accepted.extension,
        )));
    }
}
