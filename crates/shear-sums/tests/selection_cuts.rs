use shear_core::MdetStep;
use shear_sums::{ObjectRow, SelectionCuts, WeightScheme};

type Mutation = fn(&mut ObjectRow);

fn good_row() -> ObjectRow {
    ObjectRow {
        mdet_step: "noshear".into(),
        mask_flags: 0,
        gauss_flags: 0,
        gauss_psf_flags: 0,
        gauss_obj_flags: 0,
        psfrec_flags: 0,
        gauss_s2n: 25.0,
        gauss_t_ratio: 1.2,
        gauss_g_1: 0.1,
        gauss_g_2: -0.05,
        gauss_g_cov_1_1: 0.0004,
        gauss_g_cov_2_2: 0.0006,
        mfrac: 0.0,
    }
}

#[test]
fn clean_object_passes() {
    let cuts = SelectionCuts::default();
    assert!(cuts.accepts(&good_row(), MdetStep::Noshear));
    assert!(!cuts.accepts(&good_row(), MdetStep::OneP));
}

#[test]
fn step_labels_are_parsed_from_rows() {
    let cuts = SelectionCuts::default();
    let mut row = good_row();
    row.mdet_step = " 1m".into();
    assert_eq!(row.step(), Some(MdetStep::OneM));
    assert!(cuts.accepts(&row, MdetStep::OneM));
    row.mdet_step = "2p".into();
    assert_eq!(row.step(), None);
    assert!(MdetStep::ALL.iter().all(|step| !cuts.accepts(&row, *step)));
}

#[test]
fn each_cut_rejects() {
    let cuts = SelectionCuts::default();
    let mutations: [(&str, Mutation); 8] = [
        ("gauss_flags", |r| { r.gauss_flags = 1; }),
        ("gauss_psf_flags", |r| { r.gauss_psf_flags = 2; }),
        ("gauss_obj_flags", |r| { r.gauss_obj_flags = 4; }),
        ("psfrec_flags", |r| { r.psfrec_flags = 1; }),
        ("mfrac", |r| { r.mfrac = 0.02; }),
        ("mask_flags", |r| { r.mask_flags = 16; }),
        ("s2n", |r| { r.gauss_s2n = 9.99; }),
        ("t_ratio", |r| { r.gauss_t_ratio = 0.49; }),
    ];
    for (name, mutate) in mutations {
        let mut row = good_row();
        mutate(&mut row);
        assert!(!cuts.passes_quality(&row), "{name} should reject");
    }
}

#[test]
fn range_bounds_are_inclusive() {
    let cuts = SelectionCuts::default();
    let mut row = good_row();
    row.gauss_s2n = 10.0;
    row.gauss_t_ratio = 0.5;
    assert!(cuts.passes_quality(&row));
}

#[test]
fn ignored_mask_bit_still_fails_strict_condition() {
    // Bit 16 passes the relaxed check but the strict `mask_flags == 0` still applies.
    let mut cuts = SelectionCuts::default();
    let mut row = good_row();
    row.mask_flags = 16;
    assert!(!cuts.passes_quality(&row));
    cuts.ignored_mask_bits = 0;
    row.mask_flags = 0;
    assert!(cuts.passes_quality(&row));
}

#[test]
fn cuts_load_from_partial_yaml() {
    let cuts: SelectionCuts = serde_yaml::from_str("s2n_min: 20\n").expect("yaml");
    assert_eq!(cuts.s2n_min, 20.0);
    assert_eq!(cuts.max_mfrac, 0.02);
    assert_eq!(cuts.ignored_mask_bits, 16);
}

#[test]
fn weight_schemes() {
    let row = good_row();
    assert_eq!(WeightScheme::default().weight(&row), 1.0);
    let ivar = WeightScheme::InverseVariance { shape_noise: 0.07 };
    let expected = 1.0 / (0.07 * 0.07 + 0.0005);
    assert!((ivar.weight(&row) - expected).abs() < 1e-9);

    let parsed: WeightScheme = serde_yaml::from_str("scheme: inverse_variance\n").expect("yaml");
    assert_eq!(parsed, WeightScheme::InverseVariance { shape_noise: 0.07 });
}
