//! Error types for severity labelling and metric comparison
//!
//! Single-item operations (`compute_percentage`, `classify`, `compare`) return
//! these errors directly. Batch operations record them per item instead of
//! propagating them, see [`crate::labeling::BatchResult::failures`] and
//! [`crate::comparison::BatchComparison::outcomes`].

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors raised while turning a mask into a severity label
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelError {
    #[error("Mask contains no pixels")]
    EmptyMask,

    #[error("Malformed mask: row {row} has {found} pixels, expected {expected}")]
    RaggedMask {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Percentage {0} is outside [0, 100]")]
    InvalidPercentage(f64),

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Cannot derive thresholds from an empty percentage set")]
    EmptyPercentages,
}

/// Errors raised while comparing two metric populations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("Insufficient data for '{sample}': need at least {required} observations, got {actual}")]
    InsufficientSample {
        sample: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Sample '{sample}' contains a non-finite value at index {index}")]
    NonFiniteSample { sample: &'static str, index: usize },

    #[error("Confidence level must lie strictly between 0 and 1, got {0}")]
    InvalidConfidenceLevel(f64),

    #[error("Hypothesis test failed: {0}")]
    TestFailed(String),
}

/// Result alias for labelling operations
pub type LabelResult<T> = std::result::Result<T, LabelError>;

/// Result alias for comparison operations
pub type StatsResult<T> = std::result::Result<T, ComparisonError>;

// Failures are exported next to successful results, so they serialize as
// their display message.
impl Serialize for LabelError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for ComparisonError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
