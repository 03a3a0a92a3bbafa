#![deny(missing_docs)]
#![doc = "Core data types, constants and the shared error surface for paired-shear bias calibration."]

pub mod errors;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, ShearError};
pub use rng::RngHandle;
pub use types::{MdetStep, StepSums, SumRecord};

/// Ellipticity perturbation applied in the `1p`/`1m` steps.
pub const STEP_SIZE: f64 = 0.01;

/// Magnitude of the shear applied to the paired `plus`/`minus` simulations.
pub const SHEAR_TRUE: f64 = 0.02;

/// Which of the paired simulations a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShearSign {
    /// Simulation sheared by `+SHEAR_TRUE`.
    Plus,
    /// Simulation sheared by `-SHEAR_TRUE`.
    Minus,
}

impl ShearSign {
    /// Label used in file and job names.
    pub fn label(self) -> &'static str {
        match self {
            ShearSign::Plus => "plus",
            ShearSign::Minus => "minus",
        }
    }

    /// Signed applied shear for this side of the pair.
    pub fn applied_g1(self) -> f64 {
        match self {
            ShearSign::Plus => SHEAR_TRUE,
            ShearSign::Minus => -SHEAR_TRUE,
        }
    }
}
