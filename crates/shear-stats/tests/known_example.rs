mod common;

use common::{assert_close, collection, identical_pair, minus_tile, plus_tile};
use shear_core::{ShearSign, StepSums, SumRecord};
use shear_stats::{bias_from_sums, combine, estimate, jackknife};

#[test]
fn worked_example_recovers_unit_response() {
    let plus = estimate(&plus_tile());
    let minus = estimate(&minus_tile());
    assert_close(plus.r, 1.0, 1e-12);
    assert_close(minus.r, 1.0, 1e-12);
    assert_close(plus.s1, 0.02, 1e-12);
    assert_close(minus.s1, -0.02, 1e-12);
    assert_eq!(plus.s2, 0.0);
}

#[test]
fn identical_tiles_give_zero_jackknife_errors() {
    let (plus, minus) = identical_pair(3);
    let result = jackknife(&plus, &minus).expect("jackknife");

    assert_eq!(result.tiles, 3);
    assert_close(result.r.value, 1.0, 1e-12);
    assert_close(result.m1.value, 0.0, 1e-12);
    assert_eq!(result.c1.value, 0.0);
    assert_eq!(result.c2.value, 0.0);

    assert_eq!(result.r.err, 0.0);
    assert_eq!(result.m1.err, 0.0);
    assert_eq!(result.c1.err, 0.0);
    assert_eq!(result.c2.err, 0.0);
    assert_eq!(result.nonfinite_samples, 0);
    assert!(result.is_finite());
}

#[test]
fn zero_shape_signal_gives_zero_additive_bias() {
    let quiet = |one_p: f64, one_m: f64| {
        StepSums::new(
            SumRecord::new(120.0, 0.0, 0.0),
            SumRecord::new(120.0, one_p, 0.0),
            SumRecord::new(120.0, one_m, 0.0),
        )
    };
    let plus = collection(ShearSign::Plus, vec![quiet(1.2, -1.2); 4]);
    let minus = collection(ShearSign::Minus, vec![quiet(1.2, -1.2); 4]);
    let result = jackknife(&plus, &minus).expect("jackknife");

    assert_eq!(result.c1.value, 0.0);
    assert_eq!(result.c2.value, 0.0);
    assert!(result.r.value.is_finite());
    // No shear recovered at all: the multiplicative bias is exactly -1.
    assert_eq!(result.m1.value, -1.0);
}

#[test]
fn fully_zero_sums_propagate_nan() {
    let zero = StepSums::new(
        SumRecord::new(100.0, 0.0, 0.0),
        SumRecord::new(100.0, 0.0, 0.0),
        SumRecord::new(100.0, 0.0, 0.0),
    );
    let bias = bias_from_sums(&zero, &zero);
    assert_eq!(bias.r11, 0.0);
    assert!(bias.m1.is_nan());
    assert!(bias.c1.is_nan());
}

#[test]
fn zero_weight_tile_is_visible_in_the_errors() {
    let mut plus_tiles = vec![plus_tile(); 3];
    let minus_tiles = vec![minus_tile(); 3];
    // A tile that carries the entire noshear weight: leaving it out empties the step.
    plus_tiles[0].noshear = SumRecord::new(300.0, 6.0, 0.0);
    plus_tiles[1].noshear = SumRecord::default();
    plus_tiles[2].noshear = SumRecord::default();
    let plus = collection(ShearSign::Plus, plus_tiles);
    let minus = collection(ShearSign::Minus, minus_tiles);

    let full = bias_from_sums(&combine(&plus), &combine(&minus));
    assert!(full.m1.is_finite());

    let result = jackknife(&plus, &minus).expect("jackknife");
    assert_eq!(result.m1.value, full.m1);
    assert_eq!(result.nonfinite_samples, 1);
    assert!(result.m1.err.is_nan());
    assert!(!result.is_finite());
}
