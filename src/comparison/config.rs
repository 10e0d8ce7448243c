// Configuration for model metric comparison
//
// Every compare()/compare_all() call receives its configuration explicitly;
// presets cover the usual confidence levels.

use crate::error::ComparisonError;
use serde::{Deserialize, Serialize};

/// Variance assumption of the two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceAssumption {
    /// Welch's t-test: variances may differ (default)
    #[default]
    Welch,
    /// Student's pooled t-test: variances assumed equal
    Pooled,
}

/// Configuration for comparing two metric populations
///
/// # Example
/// ```
/// use corrosion_severity::comparison::ComparisonConfig;
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert!((config.significance_level() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Confidence level for intervals and the significance decision
    ///
    /// - 0.95 (default): a difference is significant when p < 0.05
    /// - 0.99: stricter, fewer false positives
    /// - 0.90: looser, catches smaller differences
    pub confidence_level: f64,

    /// Which two-sample t-test to run
    ///
    /// Welch by default, since per-model sample sizes and variances are not
    /// guaranteed to match. `Pooled` reproduces reports computed with the
    /// equal-variance test.
    pub variance: VarianceAssumption,

    /// Metric count from which `compare_all` runs on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            variance: VarianceAssumption::Welch,
            parallel_threshold: 16,
        }
    }
}

impl ComparisonConfig {
    /// 99% confidence
    pub fn strict() -> Self {
        Self {
            confidence_level: 0.99,
            ..Self::default()
        }
    }

    /// 90% confidence
    pub fn permissive() -> Self {
        Self {
            confidence_level: 0.90,
            ..Self::default()
        }
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_variance(mut self, variance: VarianceAssumption) -> Self {
        self.variance = variance;
        self
    }

    /// Alpha: `1 - confidence_level`
    pub fn significance_level(&self) -> f64 {
        1.0 - self.confidence_level
    }

    pub fn validate(&self) -> Result<(), ComparisonError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ComparisonError::InvalidConfidenceLevel(
                self.confidence_level,
            ));
        }
        Ok(())
    }
}
