// Two-population comparison of a model metric
//
// Direction convention: A is the baseline model, B the candidate.
// mean_difference = mean(B) - mean(A) and Cohen's d uses the same sign, so a
// positive value always means the candidate scored higher.
//
// Everything is computed in f64 from the descriptive statistics: Welch's
// t-test by default, the pooled test on request, and the exact Student-t
// tail probability for the p-value.

use super::config::{ComparisonConfig, VarianceAssumption};
use super::descriptive::DescriptiveStats;
use super::student_t::two_tailed_p_value;
use crate::error::{ComparisonError, StatsResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-sample measurements of one metric for both models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPair {
    /// Model A
    pub baseline: Vec<f64>,
    /// Model B
    pub candidate: Vec<f64>,
}

impl MetricPair {
    pub fn new(baseline: Vec<f64>, candidate: Vec<f64>) -> Self {
        Self {
            baseline,
            candidate,
        }
    }
}

/// Conventional Cohen's d bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    /// |d| < 0.2
    Negligible,
    /// 0.2 <= |d| < 0.5
    Small,
    /// 0.5 <= |d| < 0.8
    Medium,
    /// |d| >= 0.8
    Large,
}

impl EffectMagnitude {
    pub fn from_cohens_d(d: f64) -> Self {
        match d.abs() {
            x if x < 0.2 => Self::Negligible,
            x if x < 0.5 => Self::Small,
            x if x < 0.8 => Self::Medium,
            _ => Self::Large,
        }
    }
}

/// Statistical comparison of one metric between baseline (A) and candidate (B)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub metric_name: String,
    /// Baseline (A)
    pub stats_a: DescriptiveStats,
    /// Candidate (B)
    pub stats_b: DescriptiveStats,
    /// `mean_b - mean_a`
    pub mean_difference: f64,
    /// t-statistic, positive when B's mean is higher
    pub t_statistic: f64,
    /// Welch–Satterthwaite df, or `n_a + n_b - 2` for the pooled test
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Cohen's d, `(mean_b - mean_a) / pooled_std`
    pub effect_size: f64,
    /// `p_value < 1 - confidence_level`
    pub significant: bool,
    pub variance: VarianceAssumption,
    pub confidence_level: f64,
}

impl ComparisonResult {
    pub fn effect_magnitude(&self) -> EffectMagnitude {
        EffectMagnitude::from_cohens_d(self.effect_size)
    }

    /// Significant and in favour of the candidate
    pub fn candidate_is_better(&self) -> bool {
        self.significant && self.mean_difference > 0.0
    }
}

/// Compare one metric between two independent samples
///
/// # Errors
/// - `InsufficientSample` if either sample has fewer than 2 observations
/// - `NonFiniteSample` if either sample holds NaN or infinity
/// - `InvalidConfidenceLevel` if the config's level is outside (0, 1)
/// - `TestFailed` if the t-test cannot be evaluated
///
/// # Example
/// ```
/// use corrosion_severity::comparison::{compare, ComparisonConfig};
///
/// let resnet = [0.81, 0.83, 0.80, 0.82, 0.84];
/// let effnet = [0.88, 0.90, 0.87, 0.89, 0.91];
///
/// let result = compare("iou", &resnet, &effnet, &ComparisonConfig::default()).unwrap();
/// assert!(result.mean_difference > 0.0);
/// assert!(result.significant);
/// ```
pub fn compare(
    metric_name: &str,
    samples_a: &[f64],
    samples_b: &[f64],
    config: &ComparisonConfig,
) -> StatsResult<ComparisonResult> {
    config.validate()?;

    let stats_a = DescriptiveStats::from_samples("baseline", samples_a, config.confidence_level)?;
    let stats_b = DescriptiveStats::from_samples("candidate", samples_b, config.confidence_level)?;

    let mean_difference = stats_b.mean - stats_a.mean;
    let effect_size = cohens_d(&stats_a, &stats_b, mean_difference);
    let test = t_test(&stats_a, &stats_b, config.variance)?;
    let significant = test.p_value < config.significance_level();

    tracing::debug!(
        "Compared {}: diff={:.4}, t={:.3}, df={:.1}, p={:.4}, d={:.3}",
        metric_name,
        mean_difference,
        test.statistic,
        test.df,
        test.p_value,
        effect_size
    );

    Ok(ComparisonResult {
        metric_name: metric_name.to_string(),
        stats_a,
        stats_b,
        mean_difference,
        t_statistic: test.statistic,
        degrees_of_freedom: test.df,
        p_value: test.p_value,
        effect_size,
        significant,
        variance: config.variance,
        confidence_level: config.confidence_level,
    })
}

/// Results of [`compare_all`], one entry per metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchComparison {
    /// Metric name → comparison or the error that metric hit
    pub outcomes: BTreeMap<String, StatsResult<ComparisonResult>>,
    pub config: ComparisonConfig,
}

impl BatchComparison {
    pub fn get(&self, metric_name: &str) -> Option<&StatsResult<ComparisonResult>> {
        self.outcomes.get(metric_name)
    }

    /// Successful comparisons in metric-name order
    pub fn results(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.outcomes.values().filter_map(|o| o.as_ref().ok())
    }

    /// Failed metrics in metric-name order
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ComparisonError)> {
        self.outcomes
            .iter()
            .filter_map(|(name, o)| o.as_ref().err().map(|e| (name.as_str(), e)))
    }

    pub fn success_count(&self) -> usize {
        self.results().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Names of metrics with a significant difference
    pub fn significant_metrics(&self) -> Vec<&str> {
        self.results()
            .filter(|r| r.significant)
            .map(|r| r.metric_name.as_str())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Compare every named metric independently
///
/// A metric that cannot be compared (e.g. a single observation) is recorded
/// as an `Err` for that metric only; the others are still computed.
///
/// # Example
/// ```
/// use corrosion_severity::comparison::{compare_all, ComparisonConfig, MetricPair};
/// use std::collections::BTreeMap;
///
/// let mut metrics = BTreeMap::new();
/// metrics.insert("iou".to_string(), MetricPair::new(vec![0.7, 0.72, 0.71], vec![0.75, 0.77, 0.76]));
/// metrics.insert("dice".to_string(), MetricPair::new(vec![0.8], vec![0.85, 0.86]));
///
/// let batch = compare_all(&metrics, &ComparisonConfig::default());
/// assert!(batch.get("iou").unwrap().is_ok());
/// assert!(batch.get("dice").unwrap().is_err());
/// ```
pub fn compare_all(
    metrics: &BTreeMap<String, MetricPair>,
    config: &ComparisonConfig,
) -> BatchComparison {
    let run = |(name, pair): &(&String, &MetricPair)| {
        let outcome = compare(name, &pair.baseline, &pair.candidate, config);
        if let Err(e) = &outcome {
            tracing::warn!("Failed to compare metric {}: {}", name, e);
        }
        ((*name).clone(), outcome)
    };

    let items: Vec<(&String, &MetricPair)> = metrics.iter().collect();
    let outcomes: BTreeMap<_, _> = if items.len() >= config.parallel_threshold {
        items.par_iter().map(run).collect()
    } else {
        items.iter().map(run).collect()
    };

    let batch = BatchComparison {
        outcomes,
        config: config.clone(),
    };
    tracing::info!(
        "Compared {} metrics ({} failed, {} significant)",
        batch.outcomes.len(),
        batch.failure_count(),
        batch.significant_metrics().len()
    );
    batch
}

struct TTest {
    statistic: f64,
    df: f64,
    p_value: f64,
}

/// Two-sample t-test from the descriptive statistics
///
/// Welch: `se² = s_a²/n_a + s_b²/n_b` with Welch–Satterthwaite df.
/// Pooled: `se² = s_p²·(1/n_a + 1/n_b)` with `n_a + n_b - 2` df.
fn t_test(
    stats_a: &DescriptiveStats,
    stats_b: &DescriptiveStats,
    variance: VarianceAssumption,
) -> StatsResult<TTest> {
    let n_a = stats_a.sample_size as f64;
    let n_b = stats_b.sample_size as f64;
    let pooled_df = n_a + n_b - 2.0;
    let mean_difference = stats_b.mean - stats_a.mean;

    let (standard_error, df) = match variance {
        VarianceAssumption::Welch => {
            let term_a = stats_a.variance() / n_a;
            let term_b = stats_b.variance() / n_b;
            let se_squared = term_a + term_b;
            // Weights in [0, 1] keep the df formula free of underflow.
            let w_a = term_a / se_squared;
            let w_b = term_b / se_squared;
            let df = 1.0 / (w_a * w_a / (n_a - 1.0) + w_b * w_b / (n_b - 1.0));
            (se_squared.sqrt(), df)
        }
        VarianceAssumption::Pooled => {
            let pooled_variance = ((n_a - 1.0) * stats_a.variance()
                + (n_b - 1.0) * stats_b.variance())
                / pooled_df;
            ((pooled_variance * (1.0 / n_a + 1.0 / n_b)).sqrt(), pooled_df)
        }
    };

    // No spread at all: the statistic is 0/0 or ±inf, decide directly.
    if standard_error == 0.0 {
        return Ok(if mean_difference == 0.0 {
            TTest {
                statistic: 0.0,
                df: pooled_df,
                p_value: 1.0,
            }
        } else {
            TTest {
                statistic: f64::INFINITY.copysign(mean_difference),
                df: pooled_df,
                p_value: 0.0,
            }
        });
    }

    let statistic = mean_difference / standard_error;
    let p_value = two_tailed_p_value(statistic, df);
    if !p_value.is_finite() {
        return Err(ComparisonError::TestFailed(format!(
            "t-test produced a non-finite p-value (t={}, df={})",
            statistic, df
        )));
    }

    Ok(TTest {
        statistic,
        df,
        p_value,
    })
}

/// Cohen's d with the pooled standard deviation
fn cohens_d(stats_a: &DescriptiveStats, stats_b: &DescriptiveStats, mean_difference: f64) -> f64 {
    let n_a = stats_a.sample_size as f64;
    let n_b = stats_b.sample_size as f64;
    let pooled_variance =
        ((n_a - 1.0) * stats_a.variance() + (n_b - 1.0) * stats_b.variance()) / (n_a + n_b - 2.0);
    let pooled_std = pooled_variance.sqrt();

    if pooled_std == 0.0 {
        if mean_difference == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(mean_difference)
        }
    } else {
        mean_difference / pooled_std
    }
}
