// Descriptive statistics of one metric sample
//
// Everything is computed in f64: mean, Bessel-corrected standard deviation
// and the R-7 median shared with the threshold quantiles.

use super::student_t::critical_value;
use crate::error::{ComparisonError, StatsResult};
use crate::severity::interpolate_quantile;
use serde::Serialize;

/// Observations required for a sample standard deviation
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Two-sided confidence interval for a sample mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    /// Sample standard deviation (divisor n - 1)
    pub std_dev: f64,
    pub sample_size: usize,
    /// Student-t interval `mean ± t(α/2, n-1) · std_dev / √n`
    pub confidence_interval: ConfidenceInterval,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Describe a sample
    ///
    /// `label` names the sample in errors ("baseline" / "candidate").
    ///
    /// # Errors
    /// - `InsufficientSample` for fewer than 2 observations
    /// - `NonFiniteSample` if any value is NaN or infinite
    /// - `InvalidConfidenceLevel` unless `0 < confidence_level < 1`
    pub fn from_samples(
        label: &'static str,
        values: &[f64],
        confidence_level: f64,
    ) -> StatsResult<Self> {
        check_sample(label, values)?;
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ComparisonError::InvalidConfidenceLevel(confidence_level));
        }

        let n = values.len();
        let mean = mean(values);
        let std_dev = sample_variance(values, mean).sqrt();

        let t = critical_value(confidence_level, (n - 1) as f64);
        let margin = t * std_dev / (n as f64).sqrt();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            mean,
            std_dev,
            sample_size: n,
            confidence_interval: ConfidenceInterval {
                lower: mean - margin,
                upper: mean + margin,
                level: confidence_level,
            },
            median: median(values),
            min,
            max,
        })
    }

    /// Unbiased sample variance
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.sample_size as f64).sqrt()
    }
}

/// Validate size and finiteness of a sample
pub(crate) fn check_sample(label: &'static str, values: &[f64]) -> StatsResult<()> {
    if values.len() < MIN_SAMPLE_SIZE {
        return Err(ComparisonError::InsufficientSample {
            sample: label,
            required: MIN_SAMPLE_SIZE,
            actual: values.len(),
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(ComparisonError::NonFiniteSample {
            sample: label,
            index,
        });
    }
    Ok(())
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn sample_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    interpolate_quantile(&sorted, 0.5)
}
