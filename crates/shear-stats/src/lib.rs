#![deny(missing_docs)]
#![doc = "Aggregation of per-tile shear sums, response-calibrated bias estimation and delete-one jackknife errors."]

/// Tile-sum aggregation and leave-one-out subtraction.
pub mod aggregate;
/// Bias calibration from paired shear estimates.
pub mod calibrate;
/// Tile collections and paired sum-file loading.
pub mod collection;
/// Ratio-of-sums shear and response estimation.
pub mod estimate;
/// Canonical hashing helpers.
pub mod hash;
/// Delete-one jackknife resampling.
pub mod jackknife;
/// Human readable report formatting.
pub mod report;
/// Canonical JSON and YAML serde helpers.
pub mod serde;

pub use aggregate::{combine, combine_step, leave_one_out, without_tile};
pub use calibrate::{bias_from_sums, calibrate, BiasEstimate};
pub use collection::{
    load_pairs, plus_sibling, read_step_sums, write_step_sums, PairedCollections, PairingOpts,
    TileCollection,
};
pub use estimate::{estimate, ShearEstimate};
pub use jackknife::{
    jackknife, jackknife_error, jackknife_with, leave_one_out_samples, BiasResult,
    JackknifeOpts, Measurement,
};
pub use report::{format_g, render_report, REPORT_SIGMAS};
