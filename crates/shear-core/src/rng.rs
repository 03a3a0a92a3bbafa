//! Deterministic RNG wrapper used when drawing per-tile simulation seeds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest seed handed to a single simulation job (inclusive).
pub const MAX_JOB_SEED: u64 = 1 << 16;

/// Deterministic RNG handle.
///
/// The handle is a thin wrapper around `StdRng`. A master `seed: u64` must be
/// provided by the caller; the same master seed and the same tile ordering
/// always reproduce the same per-job seeds.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws the next job seed uniformly from `[0, MAX_JOB_SEED]`.
    pub fn next_job_seed(&mut self) -> u64 {
        self.rng.gen_range(0..=MAX_JOB_SEED)
    }
}
