//! Stratified train/validation/test splits of labelled records
//!
//! Each severity class is shuffled independently with a seeded RNG and cut
//! by the requested ratios, so every split keeps roughly the class
//! proportions of the full dataset. The same seed always yields the same
//! split.

use super::batch::LabelRecord;
use crate::severity::SeverityClass;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error("Split ratios must be non-negative and sum to 1.0, got {train} + {validation} + {test}")]
    InvalidRatios {
        train: f64,
        validation: f64,
        test: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatios {
    pub train: f64,
    pub validation: f64,
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.70,
            validation: 0.15,
            test: 0.15,
        }
    }
}

impl SplitRatios {
    pub fn validate(&self) -> Result<(), SplitError> {
        let parts = [self.train, self.validation, self.test];
        let sum: f64 = parts.iter().sum();
        if parts.iter().any(|r| !(0.0..=1.0).contains(r)) || (sum - 1.0).abs() > 1e-3 {
            return Err(SplitError::InvalidRatios {
                train: self.train,
                validation: self.validation,
                test: self.test,
            });
        }
        Ok(())
    }
}

/// Identifiers per split, each list in input order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DatasetSplit {
    pub train: Vec<String>,
    pub validation: Vec<String>,
    pub test: Vec<String>,
}

impl DatasetSplit {
    pub fn len(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split records into train/validation/test, stratified by severity class
///
/// # Errors
/// `InvalidRatios` if a ratio is outside [0, 1] or they do not sum to 1
/// (tolerance 1e-3).
pub fn stratified_split(
    records: &[LabelRecord],
    ratios: &SplitRatios,
    seed: u64,
) -> Result<DatasetSplit, SplitError> {
    ratios.validate()?;

    let mut by_class: BTreeMap<SeverityClass, Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        by_class.entry(record.class).or_default().push(index);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut validation = Vec::new();
    let mut test = Vec::new();

    for indices in by_class.values_mut() {
        indices.shuffle(&mut rng);

        let n = indices.len();
        let n_train = ((n as f64 * ratios.train).round() as usize).min(n);
        let n_validation = ((n as f64 * ratios.validation).round() as usize).min(n - n_train);

        train.extend_from_slice(&indices[..n_train]);
        validation.extend_from_slice(&indices[n_train..n_train + n_validation]);
        test.extend_from_slice(&indices[n_train + n_validation..]);
    }

    let identifiers = |mut picked: Vec<usize>| -> Vec<String> {
        picked.sort_unstable();
        picked
            .into_iter()
            .map(|i| records[i].identifier.clone())
            .collect()
    };

    tracing::debug!(
        "Stratified split over {} classes: train={}, validation={}, test={}",
        by_class.len(),
        train.len(),
        validation.len(),
        test.len()
    );

    Ok(DatasetSplit {
        train: identifiers(train),
        validation: identifiers(validation),
        test: identifiers(test),
    })
}
