// Comparative statistics for two segmentation models
//
// Each metric (IoU, Dice, precision, ...) is measured per image for a
// baseline model A and a candidate model B. For every metric the engine
// reports descriptive statistics with Student-t confidence intervals, a
// two-sample t-test and Cohen's d, then decides significance at the
// configured confidence level.
//
// Implementation:
// - Welch or pooled t-test computed in f64 from the descriptive statistics
// - exact Student-t tail probabilities and critical values in student_t.rs
// - compare_all isolates failures per metric and fans out over rayon

mod config;
mod descriptive;
mod engine;
mod report;
pub mod student_t;

pub use config::{ComparisonConfig, VarianceAssumption};
pub use descriptive::{ConfidenceInterval, DescriptiveStats, MIN_SAMPLE_SIZE};
pub use engine::{
    compare, compare_all, BatchComparison, ComparisonResult, EffectMagnitude, MetricPair,
};
