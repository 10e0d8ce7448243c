// Batch label generation with per-item failure isolation
//
// A corrupt or empty mask is recorded against its identifier and the batch
// carries on. Records always come back in input order, whether the batch ran
// sequentially or on the rayon pool.

use crate::config::LabelingConfig;
use crate::error::{LabelError, LabelResult};
use crate::mask::{compute_percentage, Mask, PixelDiscriminator};
use crate::severity::{SeverityClass, SeverityScheme};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One successfully classified mask
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRecord {
    pub identifier: String,
    /// Corroded-area percentage in [0, 100]
    pub percentage: f64,
    pub class: SeverityClass,
}

/// A mask that could not be labelled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFailure {
    pub identifier: String,
    pub error: LabelError,
}

/// Outcome of one [`generate_labels`] call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    /// Successful records in input order
    pub records: Vec<LabelRecord>,
    pub success_count: usize,
    pub failure_count: usize,
    /// Count per class; every class of the scheme is present, possibly with 0
    pub class_distribution: BTreeMap<SeverityClass, usize>,
    /// Failed items in input order
    pub failures: Vec<ItemFailure>,
}

impl BatchResult {
    fn empty(scheme: &SeverityScheme) -> Self {
        let class_distribution = (0..scheme.thresholds().class_count())
            .map(|k| (SeverityClass(k), 0))
            .collect();
        Self {
            records: Vec::new(),
            success_count: 0,
            failure_count: 0,
            class_distribution,
            failures: Vec::new(),
        }
    }

    /// Total number of entries processed
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Failure recorded for `identifier`, if any (first match)
    pub fn failure_for(&self, identifier: &str) -> Option<&LabelError> {
        self.failures
            .iter()
            .find(|f| f.identifier == identifier)
            .map(|f| &f.error)
    }

    /// Fraction of entries that failed, 0.0 for an empty batch
    pub fn failure_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.failure_count as f64 / self.total() as f64
        }
    }
}

/// Compute percentage and class for every `(identifier, mask)` entry
///
/// Never fails as a whole: per-item errors end up in
/// [`BatchResult::failures`]. An empty `entries` slice yields zero counts.
///
/// Runs on the rayon pool once `entries.len()` reaches
/// `config.parallel_threshold`.
///
/// # Example
/// ```
/// use corrosion_severity::config::LabelingConfig;
/// use corrosion_severity::labeling::generate_labels;
/// use corrosion_severity::mask::{Cutoff, Mask};
/// use corrosion_severity::severity::SeverityScheme;
///
/// let config = LabelingConfig::new(SeverityScheme::three_level(10.0, 30.0).unwrap());
/// let entries = vec![
///     ("clean.png".to_string(), Mask::filled(4, 4, 0u8)),
///     ("broken.png".to_string(), Mask::from_rows(vec![])),
/// ];
///
/// let batch = generate_labels(&entries, &config, &Cutoff::grayscale());
/// assert_eq!(batch.success_count, 1);
/// assert_eq!(batch.failure_count, 1);
/// ```
pub fn generate_labels<I, P, D>(
    entries: &[(I, Mask<P>)],
    config: &LabelingConfig,
    discriminator: &D,
) -> BatchResult
where
    I: AsRef<str> + Sync,
    P: Sync,
    D: PixelDiscriminator<P> + Sync + ?Sized,
{
    let scheme = &config.scheme;
    let parallel = entries.len() >= config.parallel_threshold;

    tracing::debug!(
        "Labelling {} masks against {} thresholds (parallel={})",
        entries.len(),
        scheme.thresholds().len(),
        parallel
    );

    let label = |mask: &Mask<P>| label_mask(mask, scheme, discriminator);

    // Both branches keep input order; aggregation below is sequential.
    let outcomes: Vec<(&str, LabelResult<(f64, SeverityClass)>)> = if parallel {
        entries
            .par_iter()
            .map(|(id, mask)| (id.as_ref(), label(mask)))
            .collect()
    } else {
        entries
            .iter()
            .map(|(id, mask)| (id.as_ref(), label(mask)))
            .collect()
    };

    let mut result = BatchResult::empty(scheme);
    for (identifier, outcome) in outcomes {
        match outcome {
            Ok((percentage, class)) => {
                *result.class_distribution.entry(class).or_insert(0) += 1;
                result.success_count += 1;
                result.records.push(LabelRecord {
                    identifier: identifier.to_string(),
                    percentage,
                    class,
                });
            }
            Err(error) => {
                tracing::warn!("Failed to label {}: {}", identifier, error);
                result.failure_count += 1;
                result.failures.push(ItemFailure {
                    identifier: identifier.to_string(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        "Labelled {} of {} masks ({} failed)",
        result.success_count,
        result.total(),
        result.failure_count
    );

    result
}

/// Percentage and class of a single mask; fails fast
pub fn label_mask<P, D>(
    mask: &Mask<P>,
    scheme: &SeverityScheme,
    discriminator: &D,
) -> LabelResult<(f64, SeverityClass)>
where
    D: PixelDiscriminator<P> + ?Sized,
{
    let percentage = compute_percentage(mask, discriminator)?;
    let class = scheme.classify(percentage)?;
    Ok((percentage, class))
}
