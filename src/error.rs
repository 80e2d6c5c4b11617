//! Error type shared by the path builder and the loop closer.

use std::collections::TryReserveError;
use std::fmt;

/// Failures reported synchronously by `extend` and `close`.
///
/// None of these are retried internally; each one ends the current gesture.
/// A detected self-intersection is not an error and never appears here:
/// the intersection detector reports it as `Option<Crossing>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// A point buffer could not be grown.
    Allocation,
    /// `close` was called on a path with no points.
    NoPointSelected,
    /// The path has fewer vertices than the configured minimum for closing.
    TooFewVertices { found: usize, required: usize },
    /// The curve data does not form vertex-terminated edges.
    InvalidCurveData,
}

impl TraceError {
    /// Legacy numeric status code, for hosts that report errors as integers.
    ///
    /// `TooFewVertices` shares the "no point selected" value.
    pub fn code(&self) -> i32 {
        match self {
            TraceError::Allocation => 1,
            TraceError::NoPointSelected | TraceError::TooFewVertices { .. } => 277,
            TraceError::InvalidCurveData => 276,
        }
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Allocation => write!(f, "memory allocation failure"),
            TraceError::NoPointSelected => write!(f, "no point selected"),
            TraceError::TooFewVertices { found, required } => write!(
                f,
                "not enough vertices to close: {} of {} required",
                found, required
            ),
            TraceError::InvalidCurveData => write!(f, "bad curve data, repeated points"),
        }
    }
}

impl std::error::Error for TraceError {}

impl From<TryReserveError> for TraceError {
    fn from(_: TryReserveError) -> Self {
        TraceError::Allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_legacy_values() {
        assert_eq!(TraceError::Allocation.code(), 1);
        assert_eq!(TraceError::NoPointSelected.code(), 277);
        assert_eq!(TraceError::InvalidCurveData.code(), 276);
    }

    #[test]
    fn test_display() {
        assert_eq!(TraceError::NoPointSelected.to_string(), "no point selected");
        let e = TraceError::TooFewVertices {
            found: 2,
            required: 3,
        };
        assert_eq!(e.to_string(), "not enough vertices to close: 2 of 3 required");
    }

    #[test]
    fn test_try_reserve_maps_to_allocation() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(TraceError::from(err), TraceError::Allocation);
    }
}
