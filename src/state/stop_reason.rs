use serde::{Serialize, Serializer};
use std::fmt;

/// Why a crawl run ended
///
/// Only the first cause is kept; later causes never overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The configured time budget elapsed
    RanOutOfTime,

    /// Every worker was idle and the frontier was empty
    EmptyQueue,

    /// A response carried HTTP 429
    RateLimited,

    /// The run ended without any recorded cause
    Undefined,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RanOutOfTime => "Ran out of time",
            Self::EmptyQueue => "Empty Queue",
            Self::RateLimited => "429 status code",
            Self::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StopReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_strings() {
        assert_eq!(StopReason::RanOutOfTime.to_string(), "Ran out of time");
        assert_eq!(StopReason::EmptyQueue.to_string(), "Empty Queue");
        assert_eq!(StopReason::RateLimited.to_string(), "429 status code");
        assert_eq!(
            serde_json::to_string(&StopReason::Undefined).unwrap(),
            r#""Undefined""#
        );
    }
}
