//! Visit record definitions
//!
//! One record is kept per canonical URL. It is written once when the URL is
//! fetched (or found too deep to fetch) and may be relabeled once when the
//! fetch produced no body.

use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::fmt;

/// Pseudo status for URLs that were discovered but never requested
pub const NOT_REQUESTED_STATUS: u16 = 900;

/// Status recorded when the transport failed before any response arrived
pub const TRANSPORT_FAILURE_STATUS: u16 = 400;

/// How a URL ended up in the result store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitLabel {
    /// Fetched and processed
    Crawled,

    /// Fetched, but the response had no usable body
    FailedToGetBody,

    /// Accepted at the depth limit and therefore never requested
    MaxCrawlDepthReached,
}

impl VisitLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crawled => "Crawled",
            Self::FailedToGetBody => "Failed to get body",
            Self::MaxCrawlDepthReached => "max_crawl_depth_reached",
        }
    }
}

impl fmt::Display for VisitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VisitLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The recorded outcome for one URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitedRecord {
    /// Depth of the URL itself (its discoverer's depth plus one)
    pub depth: u32,
    pub label: VisitLabel,
    /// HTTP status, `TRANSPORT_FAILURE_STATUS`, or `NOT_REQUESTED_STATUS`
    pub status: u16,
}

impl VisitedRecord {
    pub fn crawled(depth: u32, status: u16) -> Self {
        Self {
            depth,
            label: VisitLabel::Crawled,
            status,
        }
    }

    pub fn max_depth_reached(depth: u32) -> Self {
        Self {
            depth,
            label: VisitLabel::MaxCrawlDepthReached,
            status: NOT_REQUESTED_STATUS,
        }
    }

    /// True for any 1xx or 2xx status
    pub fn is_successful(&self) -> bool {
        self.status < 300
    }

    pub fn is_not_requested(&self) -> bool {
        self.status == NOT_REQUESTED_STATUS
    }
}

/// Records serialize as a compact `[depth, label, status]` triple
impl Serialize for VisitedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.depth)?;
        tuple.serialize_element(&self.label)?;
        tuple.serialize_element(&self.status)?;
        tuple.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings() {
        assert_eq!(VisitLabel::Crawled.to_string(), "Crawled");
        assert_eq!(VisitLabel::FailedToGetBody.to_string(), "Failed to get body");
        assert_eq!(
            VisitLabel::MaxCrawlDepthReached.to_string(),
            "max_crawl_depth_reached"
        );
    }

    #[test]
    fn test_record_serializes_as_triple() {
        let record = VisitedRecord::crawled(1, 200);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"[1,"Crawled",200]"#
        );

        let terminal = VisitedRecord::max_depth_reached(15);
        assert_eq!(
            serde_json::to_string(&terminal).unwrap(),
            r#"[15,"max_crawl_depth_reached",900]"#
        );
    }

    #[test]
    fn test_status_classes() {
        assert!(VisitedRecord::crawled(1, 204).is_successful());
        assert!(VisitedRecord::crawled(1, 101).is_successful());
        assert!(!VisitedRecord::crawled(1, 301).is_successful());
        assert!(!VisitedRecord::crawled(1, TRANSPORT_FAILURE_STATUS).is_successful());
        assert!(VisitedRecord::max_depth_reached(3).is_not_requested());
    }
}
