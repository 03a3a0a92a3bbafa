use serde::{Deserialize, Serialize};
use shear_core::MdetStep;

use crate::catalog::ObjectRow;

/// Object quality cuts applied before summing.
///
/// Both mask conditions are kept as written: the object must have no mask
/// bits at all, and no bits outside `ignored_mask_bits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionCuts {
    /// Exclusive upper bound on the masked fraction.
    #[serde(default = "SelectionCuts::default_max_mfrac")]
    pub max_mfrac: f64,
    /// Mask bits tolerated by the second mask condition.
    #[serde(default = "SelectionCuts::default_ignored_mask_bits")]
    pub ignored_mask_bits: i64,
    /// Inclusive lower bound on signal to noise.
    #[serde(default = "SelectionCuts::default_s2n_min")]
    pub s2n_min: f64,
    /// Inclusive upper bound on signal to noise.
    #[serde(default = "SelectionCuts::default_upper")]
    pub s2n_max: f64,
    /// Inclusive lower bound on the size ratio.
    #[serde(default = "SelectionCuts::default_t_ratio_min")]
    pub t_ratio_min: f64,
    /// Inclusive upper bound on the size ratio.
    #[serde(default = "SelectionCuts::default_upper")]
    pub t_ratio_max: f64,
}

impl SelectionCuts {
    fn default_max_mfrac() -> f64 {
        0.02
    }
    fn default_ignored_mask_bits() -> i64 {
        16
    }
    fn default_s2n_min() -> f64 {
        10.0
    }
    fn default_t_ratio_min() -> f64 {
        0.5
    }
    fn default_upper() -> f64 {
        1.0e9
    }

    /// Whether `row` belongs to `step` and passes every cut.
    pub fn accepts(&self, row: &ObjectRow, step: MdetStep) -> bool {
        row.step() == Some(step) && self.passes_quality(row)
    }

    /// Flag, mask, masked-fraction and range cuts, ignoring the step label.
    pub fn passes_quality(&self, row: &ObjectRow) -> bool {
        row.gauss_flags == 0
            && row.gauss_psf_flags == 0
            && row.gauss_obj_flags == 0
            && row.psfrec_flags == 0
            && row.mfrac < self.max_mfrac
            && row.mask_flags == 0
            && (row.mask_flags & !self.ignored_mask_bits) == 0
            && between(row.gauss_s2n, self.s2n_min, self.s2n_max)
            && between(row.gauss_t_ratio, self.t_ratio_min, self.t_ratio_max)
    }
}

impl Default for SelectionCuts {
    fn default() -> Self {
        Self {
            max_mfrac: Self::default_max_mfrac(),
            ignored_mask_bits: Self::default_ignored_mask_bits(),
            s2n_min: Self::default_s2n_min(),
            s2n_max: Self::default_upper(),
            t_ratio_min: Self::default_t_ratio_min(),
            t_ratio_max: Self::default_upper(),
        }
    }
}

fn between(value: f64, low: f64, high: f64) -> bool {
    value >= low && value <= high
}
