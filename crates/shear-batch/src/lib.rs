#![deny(missing_docs)]
#![doc = "Queue job descriptors for the paired shear simulations and the per-tile summarizer."]

/// Shared job and site configuration types.
pub mod jobs;
/// Paired simulation run jobs and tile discovery.
pub mod sim;
/// Summarizer jobs over a catalog list.
pub mod sums;
pub mod template;

pub use jobs::{BatchConfig, JobSpec};
pub use sim::{
    discover_tiles, nested_config_files, sim_job, write_sim_run, SimRunOpts, SimRunSummary,
};
pub use sums::{read_file_list, sign_of, sums_job, tilename, write_sums_jobs};
pub use template::{render, TemplateVars};
