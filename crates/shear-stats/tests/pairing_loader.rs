mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{minus_tile, plus_tile};
use shear_core::{MdetStep, ShearError, ShearSign, StepSums};
use shear_stats::{
    load_pairs, plus_sibling, read_step_sums, write_step_sums, PairingOpts,
};

fn write_tile(dir: &Path, name: &str, sums: &StepSums) -> PathBuf {
    let path = dir.join(name);
    write_step_sums(&path, sums).expect("write sums");
    path
}

#[test]
fn plus_sibling_replaces_every_token() {
    let opts = PairingOpts::default();
    let plus = plus_sibling(Path::new("/runs/minus/DES0001-minus-sums.json"), &opts)
        .expect("sibling");
    assert_eq!(plus, PathBuf::from("/runs/plus/DES0001-plus-sums.json"));
}

#[test]
fn degenerate_substitution_is_fatal() {
    let err = plus_sibling(Path::new("DES0001-sums.json"), &PairingOpts::default())
        .expect_err("no minus token");
    assert_eq!(err.info().code, "degenerate-pair");
}

#[test]
fn pairs_load_in_input_order_and_skip_missing_plus() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let mut second_plus = plus_tile();
    second_plus.noshear.wsum = 250.0;

    let a_minus = write_tile(dir.path(), "DES0001-minus-sums.json", &minus_tile());
    write_tile(dir.path(), "DES0001-plus-sums.json", &plus_tile());
    let b_minus = write_tile(dir.path(), "DES0002-minus-sums.json", &minus_tile());
    let c_minus = write_tile(dir.path(), "DES0003-minus-sums.json", &minus_tile());
    let c_plus = write_tile(dir.path(), "DES0003-plus-sums.json", &second_plus);

    let inputs = vec![c_minus, a_minus, c_plus, b_minus.clone()];
    let pairs = load_pairs(&inputs, &PairingOpts::default()).expect("load");

    assert_eq!(pairs.plus.len(), 2);
    assert_eq!(pairs.minus.len(), 2);
    assert_eq!(pairs.plus.sign(), ShearSign::Plus);
    assert_eq!(pairs.skipped, vec![b_minus]);
    assert_eq!(pairs.plus.labels(), pairs.minus.labels());
    assert_eq!(pairs.plus.labels()[0], "DES0003-minus-sums");
    assert_eq!(pairs.plus.tiles()[0], second_plus);
    assert_eq!(pairs.plus.tiles()[1], plus_tile());

    let noshear_weights: Vec<f64> = pairs
        .plus
        .step(MdetStep::Noshear)
        .map(|record| record.wsum)
        .collect();
    assert_eq!(noshear_weights, vec![250.0, 100.0]);
}

#[test]
fn custom_tokens_are_honoured() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let neg = write_tile(dir.path(), "tile-g1neg.json", &minus_tile());
    write_tile(dir.path(), "tile-g1pos.json", &plus_tile());
    let opts = PairingOpts {
        minus_token: "g1neg".into(),
        plus_token: "g1pos".into(),
    };
    let pairs = load_pairs(&[neg], &opts).expect("load");
    assert_eq!(pairs.plus.len(), 1);
}

#[test]
fn malformed_sum_file_is_a_serde_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("bad-minus.json");
    fs::write(&path, b"{\"noshear\": {}}").expect("write");
    let err = read_step_sums(&path).expect_err("malformed");
    assert_eq!(err.info().code, "json-deserialize");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn sum_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = write_tile(dir.path(), "nested/DES0009-minus-sums.json", &minus_tile());
    assert_eq!(read_step_sums(&path).expect("read"), minus_tile());
    let text = fs::read_to_string(&path).expect("text");
    assert!(text.contains("\"1p\""));
}

#[test]
fn empty_plus_token_is_rejected() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let neg = write_tile(dir.path(), "DESA-g1neg.json", &minus_tile());
    write_tile(dir.path(), "DESA.json", &plus_tile());
    let opts = PairingOpts {
        minus_token: "-g1neg".into(),
        plus_token: String::new(),
    };
    let err = load_pairs(&[neg], &opts).expect_err("empty plus token");
    assert_eq!(err.info().code, "empty-token");
    assert!(matches!(err, ShearError::Config(_)));
}

#[test]
fn plus_token_inside_minus_token_is_rejected() {
    let opts = PairingOpts {
        minus_token: "g1minus".into(),
        plus_token: "minus".into(),
    };
    let inputs: [PathBuf; 0] = [];
    let err = load_pairs(&inputs, &opts).expect_err("overlapping tokens");
    assert_eq!(err.info().code, "overlapping-tokens");
    assert_eq!(
        err.info().context.get("plus_token").map(String::as_str),
        Some("minus")
    );
}
