mod common;

use common::{assert_sums_close, collection, varied_tiles};
use proptest::prelude::*;
use shear_core::{MdetStep, ShearSign, StepSums, SumRecord};
use shear_stats::{combine, combine_step, leave_one_out, without_tile, TileCollection};

fn record() -> impl Strategy<Value = SumRecord> {
    (1.0f64..1e4, -50.0f64..50.0, -50.0f64..50.0)
        .prop_map(|(w, e1, e2)| SumRecord::new(w, e1, e2))
}

fn tile() -> impl Strategy<Value = StepSums> {
    (record(), record(), record()).prop_map(|(a, b, c)| StepSums::new(a, b, c))
}

proptest! {
    #[test]
    fn partition_sums_match_full_sum(
        tiles in prop::collection::vec(tile(), 1..40),
        cut in any::<prop::sample::Index>(),
    ) {
        let split = cut.index(tiles.len() + 1);
        let full = combine(&collection(ShearSign::Plus, tiles.clone()));
        let head = combine(&collection(ShearSign::Plus, tiles[..split].to_vec()));
        let tail = combine(&collection(ShearSign::Plus, tiles[split..].to_vec()));
        assert_sums_close(&(head + tail), &full, 1e-9);
    }

    #[test]
    fn subtraction_matches_reaggregation(tiles in prop::collection::vec(tile(), 2..30)) {
        let all = collection(ShearSign::Minus, tiles.clone());
        let full = combine(&all);
        for index in 0..tiles.len() {
            let mut rest = tiles.clone();
            rest.remove(index);
            let direct = combine(&collection(ShearSign::Minus, rest));
            let subtracted = leave_one_out(&all, &full, index).expect("index in range");
            assert_sums_close(&subtracted, &direct, 1e-9);
        }
    }
}

#[test]
fn combine_step_agrees_with_combine() {
    let tiles = collection(ShearSign::Plus, varied_tiles(11, 3, 1.0));
    let full = combine(&tiles);
    for step in MdetStep::ALL {
        assert_eq!(combine_step(&tiles, step), full[step]);
    }
}

#[test]
fn empty_collection_combines_to_zero() {
    let empty = TileCollection::new(ShearSign::Plus);
    assert_eq!(combine(&empty), StepSums::default());
}

#[test]
fn leave_one_out_rejects_out_of_range_index() {
    let tiles = collection(ShearSign::Plus, varied_tiles(2, 0, 1.0));
    let full = combine(&tiles);
    let err = leave_one_out(&tiles, &full, 2).expect_err("out of range");
    assert_eq!(err.info().code, "tile-index");
    assert_eq!(without_tile(&full, &full), StepSums::default());
}
