//! Dataset-level statistics over a labelled batch

use super::batch::BatchResult;
use crate::severity::{interpolate_quantile, SeverityClass, SeverityScheme};
use serde::Serialize;
use std::collections::BTreeMap;

/// Spread of corroded-area percentages across successful records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentageStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divisor n)
    pub std_dev: f64,
}

/// Per-class breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Threshold range, e.g. `8.0%-11.0%`
    pub range: String,
    pub count: usize,
    /// Share of successful records, in percent
    pub share_percent: f64,
    /// Lowest percentage in the class, `None` when the class is empty
    pub min_percentage: Option<f64>,
    pub max_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSummary {
    pub labelled: usize,
    pub failed: usize,
    /// `None` when nothing was labelled
    pub percentages: Option<PercentageStats>,
    pub classes: BTreeMap<SeverityClass, ClassSummary>,
}

impl BatchResult {
    /// Summarize percentages overall and per class
    ///
    /// `scheme` must be the one the batch was labelled with; it supplies class
    /// names and ranges.
    pub fn summary(&self, scheme: &SeverityScheme) -> LabelSummary {
        let values: Vec<f64> = self.records.iter().map(|r| r.percentage).collect();

        let classes = self
            .class_distribution
            .iter()
            .map(|(&class, &count)| {
                let in_class = self
                    .records
                    .iter()
                    .filter(|r| r.class == class)
                    .map(|r| r.percentage);
                let share_percent = if self.success_count == 0 {
                    0.0
                } else {
                    100.0 * count as f64 / self.success_count as f64
                };
                let summary = ClassSummary {
                    name: scheme.class_name(class).map(str::to_string),
                    range: scheme.class_range(class).unwrap_or_default(),
                    count,
                    share_percent,
                    min_percentage: in_class.clone().reduce(f64::min),
                    max_percentage: in_class.reduce(f64::max),
                };
                (class, summary)
            })
            .collect();

        LabelSummary {
            labelled: self.success_count,
            failed: self.failure_count,
            percentages: percentage_stats(&values),
            classes,
        }
    }
}

fn percentage_stats(values: &[f64]) -> Option<PercentageStats> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(PercentageStats {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean,
        median: interpolate_quantile(&sorted, 0.5),
        std_dev: variance.sqrt(),
    })
}
