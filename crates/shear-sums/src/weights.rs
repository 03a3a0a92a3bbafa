use serde::{Deserialize, Serialize};

use crate::catalog::ObjectRow;

fn default_shape_noise() -> f64 {
    0.07
}

/// Per-object weighting applied when summing shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum WeightScheme {
    /// Every selected object counts once.
    #[default]
    Uniform,
    /// Inverse of shape noise plus mean measurement variance.
    InverseVariance {
        /// Intrinsic shape noise per component.
        #[serde(default = "default_shape_noise")]
        shape_noise: f64,
    },
}

impl WeightScheme {
    /// Weight assigned to one object.
    pub fn weight(&self, row: &ObjectRow) -> f64 {
        match self {
            WeightScheme::Uniform => 1.0,
            WeightScheme::InverseVariance { shape_noise } => {
                let cov = 0.5 * (row.gauss_g_cov_1_1 + row.gauss_g_cov_2_2);
                1.0 / (shape_noise * shape_noise + cov)
            }
        }
    }
}
