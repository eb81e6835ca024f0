//! State module for tracking crawl outcomes
//!
//! # Components
//!
//! - `VisitedRecord`: The recorded outcome for one URL (depth, label, status)
//! - `VisitLabel`: How a URL ended up in the result store
//! - `StopReason`: Why a crawl run ended

mod record;
mod stop_reason;

// Re-export main types
pub use record::{VisitLabel, VisitedRecord, NOT_REQUESTED_STATUS, TRANSPORT_FAILURE_STATUS};
pub use stop_reason::StopReason;
