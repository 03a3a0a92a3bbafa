use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shear_core::errors::{ErrorInfo, ShearError};
use shear_core::StepSums;
use tracing::{debug, warn};

use crate::aggregate::{combine, leave_one_out};
use crate::calibrate::{bias_from_sums, BiasEstimate};
use crate::collection::TileCollection;
use crate::hash::stable_hash_string;

fn stats_error(code: &str, message: impl Into<String>) -> ShearError {
    ShearError::Stats(ErrorInfo::new(code, message.into()))
}

/// Options controlling the resampling loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackknifeOpts {
    /// Worker threads for the leave-one-out samples; 0 uses the global pool.
    #[serde(default)]
    pub threads: usize,
}

/// Point estimate with its jackknife standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Full-sample estimate.
    pub value: f64,
    /// One-sigma jackknife standard error.
    pub err: f64,
}

impl Measurement {
    /// Symmetric interval `value ± sigmas * err`.
    pub fn interval(&self, sigmas: f64) -> (f64, f64) {
        (self.value - sigmas * self.err, self.value + sigmas * self.err)
    }
}

/// Final bias estimates with jackknife errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasResult {
    /// Number of tile pairs used.
    pub tiles: usize,
    /// Mean response `R11`.
    pub r: Measurement,
    /// Multiplicative bias.
    pub m1: Measurement,
    /// Additive bias, component 1.
    pub c1: Measurement,
    /// Additive bias, component 2.
    pub c2: Measurement,
    /// Leave-one-out samples whose estimate was not finite.
    pub nonfinite_samples: usize,
    /// Stable hash of the combined input sums and the estimates.
    pub result_hash: String,
}

impl BiasResult {
    /// Whether every value and error is finite.
    pub fn is_finite(&self) -> bool {
        [self.r, self.m1, self.c1, self.c2]
            .iter()
            .all(|m| m.value.is_finite() && m.err.is_finite())
    }
}

/// Computes the leave-one-out estimate for every tile index, in index order.
///
/// Each sample subtracts tile `i` from the full-sample sums of both signs
/// rather than re-summing the remaining tiles.
pub fn leave_one_out_samples(
    plus: &TileCollection,
    minus: &TileCollection,
    full_plus: &StepSums,
    full_minus: &StepSums,
) -> Result<Vec<BiasEstimate>, ShearError> {
    (0..plus.len().min(minus.len()))
        .into_par_iter()
        .map(|index| -> Result<BiasEstimate, ShearError> {
            Ok(bias_from_sums(
                &leave_one_out(plus, full_plus, index)?,
                &leave_one_out(minus, full_minus, index)?,
            ))
        })
        .collect()
}

/// Delete-one jackknife standard error around `full`.
pub fn jackknife_error<I>(full: f64, samples: I, n: usize) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let fac = (n as f64 - 1.0) / n as f64;
    let sum_sq: f64 = samples
        .into_iter()
        .map(|sample| (full - sample).powi(2))
        .sum();
    (fac * sum_sq).sqrt()
}

fn measure(
    full: &BiasEstimate,
    samples: &[BiasEstimate],
    pick: fn(&BiasEstimate) -> f64,
) -> Measurement {
    Measurement {
        value: pick(full),
        err: jackknife_error(pick(full), samples.iter().map(pick), samples.len()),
    }
}

fn validate(plus: &TileCollection, minus: &TileCollection) -> Result<usize, ShearError> {
    if plus.len() != minus.len() {
        return Err(ShearError::Config(
            ErrorInfo::new(
                "tile-count-mismatch",
                "plus and minus collections hold different tile counts",
            )
            .with_context("plus", plus.len().to_string())
            .with_context("minus", minus.len().to_string()),
        ));
    }
    let n = plus.len();
    if n < 2 {
        return Err(ShearError::Config(
            ErrorInfo::new(
                "insufficient-tiles",
                "jackknife variance needs at least two tiles",
            )
            .with_context("tiles", n.to_string())
            .with_hint("check that plus siblings exist for the minus inputs"),
        ));
    }
    Ok(n)
}

/// Runs the jackknife on the global thread pool.
pub fn jackknife(plus: &TileCollection, minus: &TileCollection) -> Result<BiasResult, ShearError> {
    jackknife_with(plus, minus, &JackknifeOpts::default())
}

/// Point estimates and delete-one jackknife errors for `m1`, `c1`, `c2` and `R11`.
pub fn jackknife_with(
    plus: &TileCollection,
    minus: &TileCollection,
    opts: &JackknifeOpts,
) -> Result<BiasResult, ShearError> {
    let n = validate(plus, minus)?;

    let full_plus = combine(plus);
    let full_minus = combine(minus);
    let full = bias_from_sums(&full_plus, &full_minus);
    debug!(tiles = n, ?full, "full-sample estimate");

    let samples = if opts.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.threads)
            .build()
            .map_err(|err| stats_error("thread-pool", err.to_string()))?;
        pool.install(|| leave_one_out_samples(plus, minus, &full_plus, &full_minus))?
    } else {
        leave_one_out_samples(plus, minus, &full_plus, &full_minus)?
    };

    let nonfinite_samples = samples.iter().filter(|s| !s.is_finite()).count();
    if nonfinite_samples > 0 {
        warn!(
            nonfinite_samples,
            tiles = n,
            "leave-one-out samples with non-finite estimates"
        );
    }

    let r = measure(&full, &samples, |s| s.r11);
    let m1 = measure(&full, &samples, |s| s.m1);
    let c1 = measure(&full, &samples, |s| s.c1);
    let c2 = measure(&full, &samples, |s| s.c2);

    let result_hash =
        stable_hash_string(&(n, &full_plus, &full_minus, &full, &r, &m1, &c1, &c2))?;
    let result = BiasResult {
        tiles: n,
        r,
        m1,
        c1,
        c2,
        nonfinite_samples,
        result_hash,
    };
    if !result.is_finite() {
        warn!(tiles = n, "bias result contains non-finite values");
    }
    Ok(result)
}
