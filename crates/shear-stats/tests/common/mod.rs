#![allow(dead_code)]

use shear_core::{ShearSign, StepSums, SumRecord};
use shear_stats::TileCollection;

/// Plus-side tile from the worked example: g1 = 0.02, response 1.
pub fn plus_tile() -> StepSums {
    StepSums::new(
        SumRecord::new(100.0, 2.0, 0.0),
        SumRecord::new(100.0, 3.0, 0.0),
        SumRecord::new(100.0, 1.0, 0.0),
    )
}

/// Mirror of [`plus_tile`] for the minus simulation.
pub fn minus_tile() -> StepSums {
    StepSums::new(
        SumRecord::new(100.0, -2.0, 0.0),
        SumRecord::new(100.0, -1.0, 0.0),
        SumRecord::new(100.0, -3.0, 0.0),
    )
}

pub fn collection(sign: ShearSign, tiles: Vec<StepSums>) -> TileCollection {
    TileCollection::from_tiles(sign, tiles)
}

pub fn identical_pair(n: usize) -> (TileCollection, TileCollection) {
    (
        collection(ShearSign::Plus, vec![plus_tile(); n]),
        collection(ShearSign::Minus, vec![minus_tile(); n]),
    )
}

/// Tiles with varying weights and shapes, deterministic in `seed`.
pub fn varied_tiles(n: usize, seed: u64, sign: f64) -> Vec<StepSums> {
    (0..n)
        .map(|idx| {
            let k = (idx as u64).wrapping_mul(2654435761).wrapping_add(seed) % 97;
            let w = 50.0 + k as f64;
            let g = sign * 0.02 + (k as f64 - 48.0) * 1e-4;
            StepSums::new(
                SumRecord::new(w, w * g, w * (k as f64 - 48.0) * 2e-5),
                SumRecord::new(w * 0.98, w * 0.98 * (g + 0.0101), 0.0),
                SumRecord::new(w * 1.01, w * 1.01 * (g - 0.0099), 0.0),
            )
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

pub fn assert_sums_close(actual: &StepSums, expected: &StepSums, tol: f64) {
    for (step, record) in actual.iter() {
        let other = &expected[step];
        assert_close(record.wsum, other.wsum, tol);
        assert_close(record.e1sum, other.e1sum, tol);
        assert_close(record.e2sum, other.e2sum, tol);
    }
}
