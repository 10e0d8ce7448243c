//! Corrosion severity - severity labels for corrosion masks and statistical
//! comparison of segmentation models
//!
//! The crate has two independent engines:
//!
//! - **Labelling**: binary or categorical masks are reduced to a corroded-area
//!   percentage ([`mask::compute_percentage`]), mapped to an ordinal severity
//!   class ([`severity::classify`]) and processed in batches that record
//!   per-item failures instead of aborting ([`labeling::generate_labels`]).
//! - **Comparison**: per-image metric samples of a baseline and a candidate
//!   model are compared with a two-sample t-test, Student-t confidence
//!   intervals and Cohen's d ([`comparison::compare`],
//!   [`comparison::compare_all`]).
//!
//! Image decoding, training and plotting are left to the caller.

pub mod comparison;
pub mod config;
pub mod error;
pub mod labeling;
pub mod mask;
pub mod severity;

pub use comparison::{compare, compare_all, BatchComparison, ComparisonConfig, ComparisonResult};
pub use config::{EngineConfig, LabelingConfig};
pub use error::{ComparisonError, LabelError};
pub use labeling::{generate_labels, BatchResult};
pub use mask::{compute_percentage, Mask, PixelDiscriminator};
pub use severity::{classify, SeverityClass, SeverityScheme, ThresholdSet};
