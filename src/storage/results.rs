use crate::state::{VisitLabel, VisitedRecord};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Canonical URL to recorded outcome
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Mutex<HashMap<String, VisitedRecord>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the record for `url`, replacing any previous one
    pub fn record(&self, url: &str, record: VisitedRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), record);
    }

    /// Changes the label of an existing record, keeping depth and status
    ///
    /// Returns false if `url` has no record.
    pub fn relabel(&self, url: &str, label: VisitLabel) -> bool {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        match records.get_mut(url) {
            Some(record) => {
                record.label = label;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, url: &str) -> Option<VisitedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
    }

    /// Copies every record out, in no particular order
    pub fn snapshot(&self) -> Vec<(String, VisitedRecord)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(url, record)| (url.clone(), *record))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
