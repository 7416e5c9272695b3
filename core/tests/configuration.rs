//! Model configuration and run preconditions.

use bsc_core::{
    config::{ModelConfig, PredictorTransform, Variant},
    error::SimError,
    generator::{generate, CausalGenerator},
    types::Column,
};

fn shipped_config_path() -> String {
    format!("{}/../data/causal_model.json", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn shipped_json_matches_canonical_preset() {
    let loaded = ModelConfig::load(shipped_config_path()).expect("load shipped config");
    assert_eq!(loaded, ModelConfig::balanced_scorecard());
}

#[test]
fn missing_config_file_is_an_error() {
    let err = ModelConfig::load("/definitely/not/here/causal_model.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read"), "got {err}");
}

#[test]
fn json_round_trip_preserves_the_model() {
    let cfg = ModelConfig::raw_variant();
    let json = cfg.to_json().expect("to json");
    let back: ModelConfig = serde_json::from_str(&json).expect("from json");
    assert_eq!(back, cfg);
}

#[test]
fn canonical_preset_exposes_the_reference_constants() {
    let cfg = Variant::Canonical.config();
    let a1 = cfg.root(Column::A1).expect("A1");
    assert_eq!((a1.mean, a1.std_dev), (32.0, 6.0));

    let f1 = cfg.derived(Column::F1).expect("F1");
    assert_eq!(f1.intercept, 1500.0);
    assert_eq!(f1.noise_std_dev, 200.0);
    assert_eq!((f1.clip.low, f1.clip.high), (500.0, 8000.0));
    let terms: Vec<(Column, f64)> = f1.terms.iter().map(|t| (t.column, t.coefficient)).collect();
    assert_eq!(terms, vec![(Column::C2, 1800.0), (Column::P1, 900.0)]);

    assert!(cfg
        .derived
        .iter()
        .flat_map(|d| &d.terms)
        .all(|t| t.transform == PredictorTransform::Standardized));
}

#[test]
fn raw_preset_scales_revenue_by_its_maximum() {
    let cfg = Variant::Raw.config();
    let f2 = cfg.derived(Column::F2).expect("F2");
    assert_eq!(f2.terms[0].transform, PredictorTransform::ScaledByMax);
    assert_eq!(Variant::parse("raw"), Some(Variant::Raw));
    assert_eq!(Variant::parse("fancy"), None);
}

#[test]
fn single_row_is_rejected_before_any_draw() {
    let err = CausalGenerator::new(ModelConfig::balanced_scorecard(), 42, 1)
        .err()
        .expect("one row must be rejected");
    assert!(matches!(err, SimError::InvalidSampleSize { samples: 1 }), "got {err:?}");
}

#[test]
fn two_rows_is_the_smallest_table() {
    // With two rows a clipped column can collapse to one value; either
    // outcome is acceptable, but never a panic or a short table.
    match generate(&ModelConfig::balanced_scorecard(), 42, 2) {
        Ok(run) => assert_eq!(run.table.rows(), 2),
        Err(err) => assert!(matches!(err, SimError::DegenerateColumn { .. }), "got {err:?}"),
    }
}

#[test]
fn invalid_model_is_rejected_before_generation() {
    let mut cfg = ModelConfig::balanced_scorecard();
    cfg.derived[1].noise_std_dev = -0.02;
    let err = generate(&cfg, 42, 100).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig { .. }), "got {err:?}");
}
