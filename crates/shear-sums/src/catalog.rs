use std::path::Path;

use serde::{Deserialize, Serialize};
use shear_core::errors::{ErrorInfo, ShearError};
use shear_core::MdetStep;

fn row_error(path: &Path, row: usize, err: impl ToString) -> ShearError {
    ShearError::Data(
        ErrorInfo::new("catalog-row", err.to_string())
            .with_context("path", path.display().to_string())
            .with_context("row", row.to_string()),
    )
}

/// One detected object as read from a shape catalog.
///
/// Only the columns the summarizer needs are decoded; extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRow {
    /// Detection-mode step label (`noshear`, `1p`, `1m`, ...).
    pub mdet_step: String,
    /// Bitmask of image-level mask flags.
    pub mask_flags: i64,
    /// Overall Gaussian-moments fit flags.
    pub gauss_flags: i64,
    /// PSF fit flags.
    pub gauss_psf_flags: i64,
    /// Object fit flags.
    pub gauss_obj_flags: i64,
    /// PSF reconstruction flags.
    pub psfrec_flags: i64,
    /// Signal to noise.
    pub gauss_s2n: f64,
    /// Object to PSF size ratio.
    #[serde(rename = "gauss_T_ratio")]
    pub gauss_t_ratio: f64,
    /// Ellipticity component 1.
    pub gauss_g_1: f64,
    /// Ellipticity component 2.
    pub gauss_g_2: f64,
    /// Ellipticity variance, component 1.
    pub gauss_g_cov_1_1: f64,
    /// Ellipticity variance, component 2.
    pub gauss_g_cov_2_2: f64,
    /// Masked fraction of the object footprint.
    pub mfrac: f64,
}

impl ObjectRow {
    /// Parsed detection-mode step, or `None` for steps the calibration does not use
    /// (`2p`, `2m`, ...).
    pub fn step(&self) -> Option<MdetStep> {
        self.mdet_step.parse().ok()
    }
}

/// Reads every object of a CSV catalog with a header row.
pub fn read_catalog(path: &Path) -> Result<Vec<ObjectRow>, ShearError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|err| ShearError::io("catalog-open", path, err))?;
    reader
        .deserialize::<ObjectRow>()
        .enumerate()
        .map(|(idx, row)| row.map_err(|err| row_error(path, idx + 1, err)))
        .collect()
}
