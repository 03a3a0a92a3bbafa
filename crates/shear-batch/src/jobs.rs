use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shear_core::errors::ShearError;
use shear_stats::serde::from_yaml_slice;
use tracing::info;

/// One rendered queue job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// Queue job name, also the descriptor file stem.
    pub job_name: String,
    /// Rendered YAML descriptor.
    pub text: String,
}

impl JobSpec {
    /// Descriptor file name (`<job_name>.yaml`).
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.job_name)
    }

    /// Writes the descriptor into `dir`, returning its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ShearError> {
        let path = dir.join(self.file_name());
        info!(path = %path.display(), "writing job");
        fs::write(&path, &self.text).map_err(|err| ShearError::io("job-write", &path, err))?;
        Ok(path)
    }
}

/// Site settings shared by every generated job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Conda environment activated before running.
    #[serde(default = "BatchConfig::default_environment")]
    pub environment: String,
    /// Command that runs the per-tile summarizer.
    #[serde(default = "BatchConfig::default_sums_command")]
    pub sums_command: String,
    /// Command that runs one shear simulation.
    #[serde(default = "BatchConfig::default_sim_command")]
    pub sim_command: String,
    /// Root of the tile image data, exported as `MEDS_DIR`.
    #[serde(default = "BatchConfig::default_meds_root")]
    pub meds_root: String,
    /// Scratch directory exported as `TMPDIR`.
    #[serde(default = "BatchConfig::default_tmp_dir")]
    pub tmp_dir: String,
}

impl BatchConfig {
    fn default_environment() -> String {
        "y6sims".to_string()
    }
    fn default_sums_command() -> String {
        "shear-sim sums".to_string()
    }
    fn default_sim_command() -> String {
        "run-eastlake-sim".to_string()
    }
    fn default_meds_root() -> String {
        "./MEDS_DIR/".to_string()
    }
    fn default_tmp_dir() -> String {
        "/tmp".to_string()
    }

    /// Loads a YAML configuration; missing keys fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self, ShearError> {
        let bytes = fs::read(path).map_err(|err| ShearError::io("batch-config-read", path, err))?;
        from_yaml_slice(&bytes)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            environment: Self::default_environment(),
            sums_command: Self::default_sums_command(),
            sim_command: Self::default_sim_command(),
            meds_root: Self::default_meds_root(),
            tmp_dir: Self::default_tmp_dir(),
        }
    }
}
