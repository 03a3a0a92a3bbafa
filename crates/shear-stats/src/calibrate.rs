use serde::{Deserialize, Serialize};
use shear_core::{StepSums, SHEAR_TRUE};

use crate::estimate::{estimate, ShearEstimate};

/// Multiplicative and additive bias with the mean response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasEstimate {
    /// Multiplicative bias in component 1.
    pub m1: f64,
    /// Additive bias in component 1.
    pub c1: f64,
    /// Additive bias in component 2.
    pub c2: f64,
    /// Response averaged over both signs.
    pub r11: f64,
}

impl BiasEstimate {
    /// Whether every quantity is finite.
    pub fn is_finite(&self) -> bool {
        self.m1.is_finite() && self.c1.is_finite() && self.c2.is_finite() && self.r11.is_finite()
    }
}

/// Combines the plus and minus estimates into bias parameters.
pub fn calibrate(plus: &ShearEstimate, minus: &ShearEstimate) -> BiasEstimate {
    BiasEstimate {
        m1: (plus.s1 - minus.s1) / (2.0 * SHEAR_TRUE) - 1.0,
        c1: 0.5 * (plus.s1 + minus.s1),
        c2: 0.5 * (plus.s2 + minus.s2),
        r11: 0.5 * (plus.r + minus.r),
    }
}

/// Estimates and calibrates in one step from combined sums of both signs.
pub fn bias_from_sums(plus: &StepSums, minus: &StepSums) -> BiasEstimate {
    calibrate(&estimate(plus), &estimate(minus))
}
