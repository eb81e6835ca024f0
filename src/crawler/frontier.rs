//! Frontier of pending crawl targets
//!
//! A plain double-ended queue whose pop end depends on the crawl's
//! discipline: FIFO gives a breadth-first crawl, LIFO a depth-first one.
//! Blocking and counting live in [`CrawlerState`](super::CrawlerState).

use crate::url::Extension;
use std::collections::VecDeque;

/// Order in which queued targets are taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// First in, first out (breadth-first)
    Fifo,
    /// Last in, first out (depth-first)
    Lifo,
}

impl Discipline {
    pub fn from_breadth_first(breadth_first: bool) -> Self {
        if breadth_first {
            Self::Fifo
        } else {
            Self::Lifo
        }
    }
}

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    /// 0 for seeds; each hop adds one
    pub depth: u32,
    pub extension: Option<Extension>,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>, depth: u32, extension: Option<Extension>) -> Self {
        Self {
            url: url.into(),
            depth,
            extension,
        }
    }
}

/// An entry in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontierItem {
    Target(CrawlTarget),
    /// Tells the worker that takes it to exit; never fetched
    Sentinel,
}

#[derive(Debug)]
pub struct Frontier {
    items: VecDeque<FrontierItem>,
    discipline: Discipline,
}

impl Frontier {
    pub fn new(discipline: Discipline) -> Self {
        Self {
            items: VecDeque::new(),
            discipline,
        }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn put(&mut self, item: FrontierItem) {
        self.items.push_back(item);
    }

    pub fn pop(&mut self) -> Option<FrontierItem> {
        match self.discipline {
            Discipline::Fifo => self.items.pop_front(),
            Discipline::Lifo => self.items.pop_back(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
