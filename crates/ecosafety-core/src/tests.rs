use crate::{
    load_ratio, CertificationConfig, ConservationTolerances, ContaminantPanel, EcoSafetyError,
    HazardWeights, NodeRow, SafetySnapshot, TrackedContaminant, DEFAULT_HAZARD_WEIGHT,
};
use rand::Rng;

fn dummy_row(cin: f64, cout: f64, cref: f64, q: f64) -> NodeRow {
    NodeRow {
        node_id: "PHX-GILA-01".into(),
        location: "Gila River outfall".into(),
        system: "wastewater".into(),
        contaminant: "EColi".into(),
        parameter: "concentration".into(),
        unit: "MPN/100mL".into(),
        baseline_cin: cin,
        baseline_cout: cout,
        q_cms: q,
        cref,
        wsup: 1.0,
        eco_impact_score: 0.7,
        karma_per_unit: 0.01,
        notes: None,
    }
}

#[test]
fn ratio_matches_normalized_removal() {
    let row = dummy_row(10.0, 2.0, 4.0, 0.5);
    assert_eq!(row.load_ratio(), 2.0);
    assert!(row.has_reference());
}

#[test]
fn row_ratio_and_raw_ratio_agree() {
    let mut rng = rand::thread_rng();
    for i in 0..200 {
        let cref = if i % 4 == 0 { 0.0 } else { rng.gen_range(-5.0..5.0) };
        let row = dummy_row(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0), cref, 1.0);
        let raw = load_ratio(row.baseline_cin, row.baseline_cout, row.cref);
        assert_eq!(row.load_ratio().to_bits(), raw.to_bits());
    }
    assert_eq!(load_ratio(10.0, 2.0, f64::NAN), 0.0);
}

#[test]
fn ratio_is_zero_without_positive_reference() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let cin = rng.gen_range(-1.0e6..1.0e6);
        let cout = rng.gen_range(-1.0e6..1.0e6);
        let cref = -rng.gen_range(0.0..1.0e3);
        assert_eq!(dummy_row(cin, cout, cref, 1.0).load_ratio(), 0.0);
        assert_eq!(dummy_row(cin, cout, 0.0, 1.0).load_ratio(), 0.0);
    }
    assert_eq!(dummy_row(5.0, 1.0, f64::NAN, 1.0).load_ratio(), 0.0);
}

#[test]
fn ratio_may_be_negative_when_contamination_rises() {
    let row = dummy_row(1.0, 9.0, 2.0, 1.0);
    assert_eq!(row.load_ratio(), -4.0);
}

#[test]
fn unknown_contaminant_uses_default_weight() {
    let weights = HazardWeights::phoenix_default();
    assert_eq!(weights.weight_for("EColi"), 1.5);
    assert_eq!(weights.weight_for("Microplastics"), DEFAULT_HAZARD_WEIGHT);
    assert!(!weights.is_known("Microplastics"));
    assert_eq!(HazardWeights::new().weight_for("PFBS"), 1.0);
}

#[test]
fn negative_hazard_weight_is_rejected() {
    let err = HazardWeights::new().with_weight("PFBS", -0.5).unwrap_err();
    assert!(matches!(err, EcoSafetyError::NegativeHazardWeight { .. }));

    let table: HazardWeights = serde_json::from_str(r#"{"TP": -1.0}"#).unwrap();
    assert!(table.validate().is_err());
}

#[test]
fn tracked_names_round_trip() {
    for c in TrackedContaminant::ALL {
        assert_eq!(TrackedContaminant::from_name(c.name()), Some(c));
    }
    assert_eq!(TrackedContaminant::from_name("pfbs"), None);
    assert_eq!(
        dummy_row(1.0, 1.0, 1.0, 1.0).tracked(),
        Some(TrackedContaminant::EColi)
    );
}

#[test]
fn default_config_is_valid_and_partial_json_fills_defaults() {
    let cfg = CertificationConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.window_seconds, 86_400.0);

    let cfg = CertificationConfig::from_json(r#"{"window_seconds": 3600.0}"#).unwrap();
    assert_eq!(cfg.window_seconds, 3600.0);
    assert_eq!(cfg.hazard_weights, HazardWeights::phoenix_default());
    assert_eq!(cfg.previous_potential, None);
}

#[test]
fn previous_potential_is_optional_and_must_be_finite() {
    let cfg = CertificationConfig::from_json(r#"{"previous_potential": 0.25}"#).unwrap();
    assert_eq!(cfg.previous_potential, Some(0.25));
    assert!(cfg.validate().is_ok());

    let cfg = CertificationConfig::from_json(r#"{"previous_potential": null}"#).unwrap();
    assert_eq!(cfg.previous_potential, None);

    let cfg = CertificationConfig {
        previous_potential: Some(f64::NAN),
        ..CertificationConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(EcoSafetyError::NonFinite {
            field: "previous_potential"
        })
    );
}

#[test]
fn non_positive_window_is_configuration_error() {
    let cfg = CertificationConfig {
        window_seconds: 0.0,
        ..CertificationConfig::default()
    };
    assert_eq!(cfg.validate(), Err(EcoSafetyError::NonPositiveWindow(0.0)));
}

#[test]
fn snapshot_validation_covers_thresholds_flow_and_stress() {
    let mut snapshot = SafetySnapshot {
        thresholds: ContaminantPanel::default_thresholds(),
        ..SafetySnapshot::default()
    };
    assert!(snapshot.validate().is_ok());

    snapshot.thresholds.set(TrackedContaminant::Tp, 0.0);
    assert!(matches!(
        snapshot.validate(),
        Err(EcoSafetyError::NonPositiveReference { .. })
    ));
    snapshot.thresholds = ContaminantPanel::default_thresholds();

    snapshot.hydraulics.q_m3s = -0.1;
    assert_eq!(snapshot.validate(), Err(EcoSafetyError::NegativeFlow(-0.1)));
    snapshot.hydraulics.q_m3s = f64::NAN;
    assert!(matches!(
        snapshot.validate(),
        Err(EcoSafetyError::NegativeFlow(q)) if q.is_nan()
    ));
    snapshot.hydraulics.q_m3s = 0.1;

    snapshot.indices.bio_stress_index = 1.2;
    assert_eq!(
        snapshot.validate(),
        Err(EcoSafetyError::StressIndexOutOfRange(1.2))
    );
}

#[test]
fn mass_tolerance_must_be_non_negative() {
    assert!(ConservationTolerances::new(0.01, 0.0).is_ok());
    assert!(ConservationTolerances::new(0.01, -0.5).is_ok());
    assert!(ConservationTolerances::new(-0.01, 0.0).is_err());
    assert!(ConservationTolerances::new(f64::INFINITY, 0.0).is_err());
}
