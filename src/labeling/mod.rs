// Severity label generation over batches of masks
//
// generate_labels() is the fault-tolerant counterpart of label_mask(): a
// single bad mask becomes an ItemFailure while the rest of the dataset is
// still labelled. The resulting BatchResult can be summarized, rendered as
// CSV, or split into stratified train/validation/test sets.

mod batch;
mod csv;
mod split;
mod summary;

pub use batch::{generate_labels, label_mask, BatchResult, ItemFailure, LabelRecord};
pub use split::{stratified_split, DatasetSplit, SplitError, SplitRatios};
pub use summary::{ClassSummary, LabelSummary, PercentageStats};
