use serde::{Deserialize, Serialize};
use shear_core::{StepSums, STEP_SIZE};

/// Calibrated mean shear and response for one sign of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearEstimate {
    /// Response-corrected shear, component 1.
    pub s1: f64,
    /// Response-corrected shear, component 2.
    pub s2: f64,
    /// Finite-difference response `R11`.
    pub r: f64,
}

/// Estimates the calibrated shear from combined sums.
///
/// Zero weights are not trapped: the ratios become NaN or infinite and carry
/// through to the caller unchanged.
pub fn estimate(combined: &StepSums) -> ShearEstimate {
    let g1 = combined.noshear.mean_e1();
    let g2 = combined.noshear.mean_e2();

    let g1_1p = combined.one_p.mean_e1();
    let g1_1m = combined.one_m.mean_e1();
    let r = (g1_1p - g1_1m) / (2.0 * STEP_SIZE);

    ShearEstimate {
        s1: g1 / r,
        s2: g2 / r,
        r,
    }
}
