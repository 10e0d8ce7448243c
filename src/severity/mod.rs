// Severity classification of corroded-area percentages
//
// A percentage in [0, 100] maps to an ordinal class by counting the
// thresholds it meets or exceeds. Thresholds are an explicit value passed into
// every call; there is no global default.

mod scheme;
mod thresholds;

pub use scheme::SeverityScheme;
pub use thresholds::{classify, SeverityClass, ThresholdSet};

pub(crate) use thresholds::interpolate_quantile;
