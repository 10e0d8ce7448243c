use super::thresholds::{SeverityClass, ThresholdSet};
use crate::error::{LabelError, LabelResult};
use serde::{Deserialize, Serialize};

/// Thresholds plus optional display names for each class
///
/// ```
/// use corrosion_severity::severity::SeverityScheme;
///
/// let scheme = SeverityScheme::three_level(8.0, 11.0).unwrap();
/// let class = scheme.classify(9.5).unwrap();
/// assert_eq!(scheme.class_name(class), Some("Moderate"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScheme")]
pub struct SeverityScheme {
    thresholds: ThresholdSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_names: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawScheme {
    thresholds: ThresholdSet,
    #[serde(default)]
    class_names: Option<Vec<String>>,
}

impl TryFrom<RawScheme> for SeverityScheme {
    type Error = LabelError;

    fn try_from(raw: RawScheme) -> LabelResult<Self> {
        match raw.class_names {
            Some(names) => Self::with_names(raw.thresholds, names),
            None => Ok(Self::new(raw.thresholds)),
        }
    }
}

impl SeverityScheme {
    /// Unnamed scheme; classes are reported by index only
    pub fn new(thresholds: ThresholdSet) -> Self {
        Self {
            thresholds,
            class_names: None,
        }
    }

    /// Scheme with one name per class (K + 1 names for K thresholds)
    pub fn with_names(thresholds: ThresholdSet, names: Vec<String>) -> LabelResult<Self> {
        if names.len() != thresholds.class_count() {
            return Err(LabelError::InvalidThresholds(format!(
                "{} thresholds define {} classes, but {} class names were given",
                thresholds.len(),
                thresholds.class_count(),
                names.len()
            )));
        }
        Ok(Self {
            thresholds,
            class_names: Some(names),
        })
    }

    /// Light (< low), Moderate (low..high), Severe (>= high)
    pub fn three_level(low: f64, high: f64) -> LabelResult<Self> {
        let thresholds = ThresholdSet::new(vec![low, high])?;
        Self::with_names(
            thresholds,
            vec![
                "Light".to_string(),
                "Moderate".to_string(),
                "Severe".to_string(),
            ],
        )
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    pub fn classify(&self, percentage: f64) -> LabelResult<SeverityClass> {
        self.thresholds.classify(percentage)
    }

    pub fn class_name(&self, class: SeverityClass) -> Option<&str> {
        self.class_names
            .as_ref()
            .and_then(|names| names.get(class.index()))
            .map(String::as_str)
    }

    /// Human-readable percentage range of a class, e.g. `8.0%-11.0%`
    pub fn class_range(&self, class: SeverityClass) -> Option<String> {
        let values = self.thresholds.values();
        let k = class.index();
        if k > values.len() {
            return None;
        }
        Some(match (k.checked_sub(1).map(|i| values[i]), values.get(k)) {
            (None, Some(upper)) => format!("<{:.1}%", upper),
            (Some(lower), Some(upper)) => format!("{:.1}%-{:.1}%", lower, upper),
            (Some(lower), None) => format!(">={:.1}%", lower),
            (None, None) => "0.0%-100.0%".to_string(),
        })
    }
}

impl From<ThresholdSet> for SeverityScheme {
    fn from(thresholds: ThresholdSet) -> Self {
        Self::new(thresholds)
    }
}
