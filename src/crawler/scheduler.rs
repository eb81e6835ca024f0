//! Shared crawl state and the termination protocol
//!
//! The frontier, the worker counters and the stop reason live behind a
//! single mutex, so "every live worker is waiting and nothing is queued" can
//! be checked atomically. A semaphore with one permit per queued item lets
//! idle workers sleep until there is something to take.
//!
//! The mutex is never held across an await point.

use super::frontier::{Discipline, Frontier, FrontierItem};
use crate::state::StopReason;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

#[derive(Debug)]
struct Shared {
    frontier: Frontier,
    active_workers: usize,
    waiting_workers: usize,
    stop_reason: Option<StopReason>,
}

/// Per-run state shared by every worker
#[derive(Debug)]
pub struct CrawlerState {
    shared: Mutex<Shared>,
    /// One permit per item in the frontier
    queued: Semaphore,
    configured_workers: usize,
    started: Instant,
    max_time: Duration,
}

impl CrawlerState {
    /// Creates the state with every worker already counted as active
    pub fn new(discipline: Discipline, workers: usize, max_time: Duration) -> Self {
        Self {
            shared: Mutex::new(Shared {
                frontier: Frontier::new(discipline),
                active_workers: workers,
                waiting_workers: 0,
                stop_reason: None,
            }),
            queued: Semaphore::new(0),
            configured_workers: workers,
            started: Instant::now(),
            max_time,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an item and wakes one waiting worker
    pub fn enqueue(&self, item: FrontierItem) {
        self.lock().frontier.put(item);
        self.queued.add_permits(1);
    }

    /// Registers the caller as waiting, unless that would make the crawl quiescent
    ///
    /// Returns false when every live worker would be waiting on an empty
    /// frontier. In that case the caller is not counted, the stop reason is
    /// set to [`StopReason::EmptyQueue`] (if unset) and the caller must exit.
    pub fn enter_wait(&self) -> bool {
        let mut shared = self.lock();
        shared.waiting_workers += 1;

        if shared.waiting_workers == shared.active_workers && shared.frontier.is_empty() {
            shared.waiting_workers -= 1;
            shared.stop_reason.get_or_insert(StopReason::EmptyQueue);
            return false;
        }
        true
    }

    /// Sleeps until an item is available, then takes it
    ///
    /// Must follow a successful [`enter_wait`](Self::enter_wait). The waiting
    /// count is decremented in the same critical section as the pop.
    pub async fn dequeue(&self) -> FrontierItem {
        match self.queued.acquire().await {
            Ok(permit) => permit.forget(),
            Err(_) => return FrontierItem::Sentinel,
        }

        let mut shared = self.lock();
        shared.waiting_workers = shared.waiting_workers.saturating_sub(1);
        shared.frontier.pop().unwrap_or(FrontierItem::Sentinel)
    }

    /// Records why the crawl stops; only the first reason is kept
    ///
    /// Returns true if this call set the reason.
    pub fn stop(&self, reason: StopReason) -> bool {
        let mut shared = self.lock();
        if shared.stop_reason.is_some() {
            return false;
        }
        shared.stop_reason = Some(reason);
        true
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.lock().stop_reason
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_reason().is_some()
    }

    /// Removes the caller from the active workers
    ///
    /// The first worker to exit enqueues one sentinel per worker still
    /// active, so workers sleeping in [`dequeue`](Self::dequeue) wake up and
    /// leave too. Returns the number of sentinels sent.
    pub fn exit_worker(&self) -> usize {
        let sentinels = {
            let mut shared = self.lock();
            shared.active_workers = shared.active_workers.saturating_sub(1);

            if shared.active_workers + 1 == self.configured_workers {
                for _ in 0..shared.active_workers {
                    shared.frontier.put(FrontierItem::Sentinel);
                }
                shared.active_workers
            } else {
                0
            }
        };

        self.queued.add_permits(sentinels);
        sentinels
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn timed_out(&self) -> bool {
        self.elapsed() > self.max_time
    }

    pub fn active_workers(&self) -> usize {
        self.lock().active_workers
    }

    pub fn waiting_workers(&self) -> usize {
        self.lock().waiting_workers
    }

    pub fn queued(&self) -> usize {
        self.lock().frontier.len()
    }
}
