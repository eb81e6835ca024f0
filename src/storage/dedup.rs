use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Set of canonical URLs that have been accepted during a crawl
///
/// First sighting wins: whatever depth a URL was first found at is the
/// depth it is crawled at.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: Mutex<HashSet<String>>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` and returns true on first sighting, false afterwards
    pub fn accept(&self, url: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if seen.contains(url) {
            return false;
        }
        seen.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
