// Threshold sets and the percentage → class boundary rule
//
// Boundary convention: left-closed / right-open. A percentage exactly equal to
// a threshold joins the higher class, so with [10, 30]:
//   9.9 → 0, 10.0 → 1, 29.9 → 1, 30.0 → 2

use crate::error::{LabelError, LabelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal severity bucket in `0..=K`, K = number of thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityClass(pub usize);

impl SeverityClass {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly increasing, non-empty list of finite class boundaries
///
/// Validated on construction and on deserialization, so holding a
/// `ThresholdSet` means classification can only fail on the percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ThresholdSet {
    values: Vec<f64>,
}

impl ThresholdSet {
    pub fn new(values: Vec<f64>) -> LabelResult<Self> {
        validate_thresholds(&values)?;
        Ok(Self { values })
    }

    /// Derive thresholds from observed percentages at the given quantiles
    ///
    /// Quantiles use linear interpolation between closest ranks (R-7, the
    /// numpy default). `from_quantiles(&pcts, &[0.33, 0.67])` yields the
    /// three-class split used to label the inspection dataset.
    ///
    /// # Errors
    /// - `EmptyPercentages` if `percentages` is empty
    /// - `InvalidThresholds` if a quantile is outside [0, 1] or the derived
    ///   values are not strictly increasing (e.g. too many tied percentages)
    pub fn from_quantiles(percentages: &[f64], quantiles: &[f64]) -> LabelResult<Self> {
        if percentages.is_empty() {
            return Err(LabelError::EmptyPercentages);
        }
        if let Some(q) = quantiles.iter().find(|q| !(0.0..=1.0).contains(*q)) {
            return Err(LabelError::InvalidThresholds(format!(
                "quantile {} is outside [0, 1]",
                q
            )));
        }

        let mut sorted = percentages.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let values = quantiles
            .iter()
            .map(|&q| interpolate_quantile(&sorted, q))
            .collect();
        Self::new(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of thresholds (K); classes range over `0..=K`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct classes (K + 1)
    pub fn class_count(&self) -> usize {
        self.values.len() + 1
    }

    /// Classify a percentage against these thresholds
    ///
    /// # Errors
    /// `InvalidPercentage` if `percentage` is NaN or outside [0, 100]
    pub fn classify(&self, percentage: f64) -> LabelResult<SeverityClass> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(LabelError::InvalidPercentage(percentage));
        }
        Ok(SeverityClass(
            self.values.partition_point(|&t| t <= percentage),
        ))
    }
}

impl TryFrom<Vec<f64>> for ThresholdSet {
    type Error = LabelError;

    fn try_from(values: Vec<f64>) -> LabelResult<Self> {
        Self::new(values)
    }
}

impl From<ThresholdSet> for Vec<f64> {
    fn from(set: ThresholdSet) -> Self {
        set.values
    }
}

/// Classify `percentage` against raw thresholds
///
/// Validates the thresholds on every call; prefer [`ThresholdSet::classify`]
/// when classifying many percentages.
///
/// # Example
/// ```
/// use corrosion_severity::severity::{classify, SeverityClass};
///
/// assert_eq!(classify(9.9, &[10.0, 30.0]).unwrap(), SeverityClass(0));
/// assert_eq!(classify(10.0, &[10.0, 30.0]).unwrap(), SeverityClass(1));
/// assert_eq!(classify(30.0, &[10.0, 30.0]).unwrap(), SeverityClass(2));
/// ```
pub fn classify(percentage: f64, thresholds: &[f64]) -> LabelResult<SeverityClass> {
    validate_thresholds(thresholds)?;
    if !(0.0..=100.0).contains(&percentage) {
        return Err(LabelError::InvalidPercentage(percentage));
    }
    Ok(SeverityClass(
        thresholds.partition_point(|&t| t <= percentage),
    ))
}

fn validate_thresholds(values: &[f64]) -> LabelResult<()> {
    if values.is_empty() {
        return Err(LabelError::InvalidThresholds(
            "at least one threshold is required".to_string(),
        ));
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(LabelError::InvalidThresholds(format!(
            "threshold at index {} is not finite",
            index
        )));
    }
    if let Some(index) = values.windows(2).position(|w| w[0] >= w[1]) {
        return Err(LabelError::InvalidThresholds(format!(
            "thresholds must be strictly increasing, but {} >= {} at index {}",
            values[index],
            values[index + 1],
            index + 1
        )));
    }
    Ok(())
}

/// R-7 quantile of already sorted, non-empty data
pub(crate) fn interpolate_quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = q * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
