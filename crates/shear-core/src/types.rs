use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ShearError};

/// Synthetic re-measurement used when computing the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MdetStep {
    /// Unperturbed baseline measurement.
    #[serde(rename = "noshear")]
    Noshear,
    /// Ellipticity perturbed by `+STEP_SIZE` in component 1.
    #[serde(rename = "1p")]
    OneP,
    /// Ellipticity perturbed by `-STEP_SIZE` in component 1.
    #[serde(rename = "1m")]
    OneM,
}

impl MdetStep {
    /// All steps in canonical order.
    pub const ALL: [MdetStep; 3] = [MdetStep::Noshear, MdetStep::OneP, MdetStep::OneM];

    /// Canonical label used in sum files and catalogs.
    pub fn label(self) -> &'static str {
        match self {
            MdetStep::Noshear => "noshear",
            MdetStep::OneP => "1p",
            MdetStep::OneM => "1m",
        }
    }
}

impl fmt::Display for MdetStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MdetStep {
    type Err = ShearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "noshear" => Ok(MdetStep::Noshear),
            "1p" => Ok(MdetStep::OneP),
            "1m" => Ok(MdetStep::OneM),
            other => Err(ShearError::Data(
                ErrorInfo::new("unknown-mdet-step", "unrecognised detection-mode step")
                    .with_context("label", other),
            )),
        }
    }
}

/// Weighted shape sums for one tile and one detection-mode step.
///
/// Every field is a plain sum over objects, so records add and subtract
/// field-wise across tiles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SumRecord {
    /// Total weight.
    pub wsum: f64,
    /// Weighted sum of shape component 1.
    pub e1sum: f64,
    /// Weighted sum of shape component 2.
    pub e2sum: f64,
}

impl SumRecord {
    /// Creates a record from its three sums.
    pub const fn new(wsum: f64, e1sum: f64, e2sum: f64) -> Self {
        Self { wsum, e1sum, e2sum }
    }

    /// Weighted mean of component 1. Non-finite when `wsum` is zero.
    pub fn mean_e1(&self) -> f64 {
        self.e1sum / self.wsum
    }

    /// Weighted mean of component 2. Non-finite when `wsum` is zero.
    pub fn mean_e2(&self) -> f64 {
        self.e2sum / self.wsum
    }

    /// Multiplies every sum by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.wsum * factor, self.e1sum * factor, self.e2sum * factor)
    }
}

impl Add for SumRecord {
    type Output = SumRecord;

    fn add(self, rhs: SumRecord) -> SumRecord {
        SumRecord::new(
            self.wsum + rhs.wsum,
            self.e1sum + rhs.e1sum,
            self.e2sum + rhs.e2sum,
        )
    }
}

impl Sub for SumRecord {
    type Output = SumRecord;

    fn sub(self, rhs: SumRecord) -> SumRecord {
        SumRecord::new(
            self.wsum - rhs.wsum,
            self.e1sum - rhs.e1sum,
            self.e2sum - rhs.e2sum,
        )
    }
}

impl AddAssign for SumRecord {
    fn add_assign(&mut self, rhs: SumRecord) {
        *self = *self + rhs;
    }
}

impl SubAssign for SumRecord {
    fn sub_assign(&mut self, rhs: SumRecord) {
        *self = *self - rhs;
    }
}

impl Sum for SumRecord {
    fn sum<I: Iterator<Item = SumRecord>>(iter: I) -> SumRecord {
        iter.fold(SumRecord::default(), Add::add)
    }
}

impl<'a> Sum<&'a SumRecord> for SumRecord {
    fn sum<I: Iterator<Item = &'a SumRecord>>(iter: I) -> SumRecord {
        iter.copied().sum()
    }
}

/// One [`SumRecord`] per detection-mode step.
///
/// This is both the content of a single per-tile sum file and the combined
/// sums of a whole tile collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepSums {
    /// Baseline sums.
    pub noshear: SumRecord,
    /// Sums under the `+` perturbation.
    #[serde(rename = "1p")]
    pub one_p: SumRecord,
    /// Sums under the `-` perturbation.
    #[serde(rename = "1m")]
    pub one_m: SumRecord,
}

impl StepSums {
    /// Creates a triple from explicit per-step records.
    pub const fn new(noshear: SumRecord, one_p: SumRecord, one_m: SumRecord) -> Self {
        Self {
            noshear,
            one_p,
            one_m,
        }
    }

    /// Builds a triple by evaluating `f` once per step.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(MdetStep) -> SumRecord,
    {
        Self::new(f(MdetStep::Noshear), f(MdetStep::OneP), f(MdetStep::OneM))
    }

    /// Iterates `(step, record)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (MdetStep, &SumRecord)> + '_ {
        MdetStep::ALL.into_iter().map(move |step| (step, &self[step]))
    }

    /// Scales every record by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::from_fn(|step| self[step].scaled(factor))
    }
}

impl Index<MdetStep> for StepSums {
    type Output = SumRecord;

    fn index(&self, step: MdetStep) -> &SumRecord {
        match step {
            MdetStep::Noshear => &self.noshear,
            MdetStep::OneP => &self.one_p,
            MdetStep::OneM => &self.one_m,
        }
    }
}

impl IndexMut<MdetStep> for StepSums {
    fn index_mut(&mut self, step: MdetStep) -> &mut SumRecord {
        match step {
            MdetStep::Noshear => &mut self.noshear,
            MdetStep::OneP => &mut self.one_p,
            MdetStep::OneM => &mut self.one_m,
        }
    }
}

impl Add for StepSums {
    type Output = StepSums;

    fn add(self, rhs: StepSums) -> StepSums {
        StepSums::from_fn(|step| self[step] + rhs[step])
    }
}

impl Sub for StepSums {
    type Output = StepSums;

    fn sub(self, rhs: StepSums) -> StepSums {
        StepSums::from_fn(|step| self[step] - rhs[step])
    }
}

impl AddAssign for StepSums {
    fn add_assign(&mut self, rhs: StepSums) {
        *self = *self + rhs;
    }
}

impl<'a> Sum<&'a StepSums> for StepSums {
    fn sum<I: Iterator<Item = &'a StepSums>>(iter: I) -> StepSums {
        iter.fold(StepSums::default(), |acc, item| acc + *item)
    }
}
