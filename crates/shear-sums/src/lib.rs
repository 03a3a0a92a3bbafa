#![deny(missing_docs)]
#![doc = "Reduces per-object shape catalogs to the per-step weighted sums consumed by `shear-stats`."]

/// CSV catalog decoding.
pub mod catalog;
/// Object selection cuts.
pub mod select;
/// Catalog summation and sum-file output.
pub mod summarize;
/// Per-object weighting schemes.
pub mod weights;

pub use catalog::{read_catalog, ObjectRow};
pub use select::SelectionCuts;
pub use summarize::{summarize_catalog, summarize_rows, summarize_step, SumsConfig};
pub use weights::WeightScheme;
