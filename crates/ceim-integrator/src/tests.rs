use crate::{
    ceim_kn_window, integrate_window, total_kn, CeimNodeInput, CeimOutput, CeimStatus,
    CeimWeights,
};
use ecosafety_core::{EcoSafetyError, HazardWeights, NodeRow};
use rand::Rng;
use std::ptr;

fn dummy_row(node_id: &str, contaminant: &str, cin: f64, cout: f64, cref: f64, q: f64) -> NodeRow {
    NodeRow {
        node_id: node_id.into(),
        location: "Phoenix 91st Ave WWTP".into(),
        system: "reclaimed".into(),
        contaminant: contaminant.into(),
        parameter: "concentration".into(),
        unit: "mg/L".into(),
        baseline_cin: cin,
        baseline_cout: cout,
        q_cms: q,
        cref,
        wsup: 1.0,
        eco_impact_score: 0.5,
        karma_per_unit: 0.02,
        notes: None,
    }
}

fn weights() -> HazardWeights {
    HazardWeights::new().with_weight("EColi", 1.5).unwrap()
}

#[test]
fn daily_window_scenario() {
    let rows = vec![dummy_row("PHX-01", "EColi", 10.0, 2.0, 4.0, 0.5)];
    let results = integrate_window(&rows, &weights(), 86_400.0).unwrap();

    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.node_id, "PHX-01");
    assert_eq!(r.contaminant, "EColi");
    assert_eq!(r.kn, 129_600.0);
    assert!((r.kn_sigma - 18.0).abs() < 1e-12);
}

#[test]
fn zero_reference_gives_zero_impact() {
    let rows = vec![
        dummy_row("PHX-02", "EColi", 50.0, 1.0, 0.0, 3.0),
        dummy_row("PHX-03", "EColi", 50.0, 1.0, -2.0, 3.0),
    ];
    for r in integrate_window(&rows, &weights(), 3600.0).unwrap() {
        assert_eq!(r.kn, 0.0);
        assert_eq!(r.kn_sigma, 0.0);
    }
}

#[test]
fn unknown_contaminant_defaults_to_unit_weight() {
    let rows = vec![dummy_row("PHX-04", "Microplastics", 3.0, 1.0, 2.0, 1.0)];
    let r = &integrate_window(&rows, &weights(), 10.0).unwrap()[0];
    assert_eq!(r.kn, 10.0);
}

#[test]
fn negative_impact_is_not_clamped() {
    let rows = vec![dummy_row("PHX-05", "EColi", 1.0, 5.0, 2.0, 1.0)];
    let r = &integrate_window(&rows, &weights(), 100.0).unwrap()[0];
    assert_eq!(r.kn, -300.0);
    assert!((r.kn_sigma - 300.0_f64.sqrt() * 0.05).abs() < 1e-12);
}

#[test]
fn nan_inputs_propagate() {
    let rows = vec![dummy_row("PHX-06", "EColi", f64::NAN, 1.0, 2.0, 1.0)];
    let r = &integrate_window(&rows, &weights(), 100.0).unwrap()[0];
    assert!(r.kn.is_nan());
    assert!(r.kn_sigma.is_nan());
}

#[test]
fn bad_window_and_weights_are_rejected() {
    let rows = vec![dummy_row("PHX-07", "EColi", 1.0, 0.5, 1.0, 1.0)];
    assert_eq!(
        integrate_window(&rows, &weights(), 0.0),
        Err(EcoSafetyError::NonPositiveWindow(0.0))
    );
    let bad: HazardWeights = serde_json_table(r#"{"EColi": -1.0}"#);
    assert!(integrate_window(&rows, &bad, 60.0).is_err());
}

fn serde_json_table(raw: &str) -> HazardWeights {
    ecosafety_core::CertificationConfig::from_json(&format!(r#"{{"hazard_weights": {raw}}}"#))
        .unwrap()
        .hazard_weights
}

#[test]
fn split_integration_concatenates_to_whole() {
    let mut rng = rand::thread_rng();
    let rows: Vec<NodeRow> = (0..40)
        .map(|i| {
            dummy_row(
                &format!("N{i}"),
                ["PFBS", "EColi", "TP", "TDS", "Other"][i % 5],
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.5..10.0),
                rng.gen_range(0.0..5.0),
            )
        })
        .collect();
    let table = HazardWeights::phoenix_default();

    let whole = integrate_window(&rows, &table, 86_400.0).unwrap();
    let (left, right) = rows.split_at(17);
    let mut parts = integrate_window(left, &table, 86_400.0).unwrap();
    parts.extend(integrate_window(right, &table, 86_400.0).unwrap());

    assert_eq!(whole, parts);
    assert_eq!(total_kn(&whole), total_kn(&parts));
}

#[test]
fn c_abi_matches_row_transform() {
    let node = CeimNodeInput {
        baseline_cin: 10.0,
        baseline_cout: 2.0,
        q_cms: 0.5,
        cref: 4.0,
        contaminant: 1,
    };
    let weights = CeimWeights {
        pfbs: 1.0,
        ecoli: 1.5,
        tp: 1.2,
        tds: 0.8,
    };
    let mut out = CeimOutput::default();

    let status = unsafe { ceim_kn_window(&node, &weights, 86_400.0, &mut out) };
    assert_eq!(status, CeimStatus::Ok);
    assert_eq!(out.kn, 129_600.0);
    assert!((out.kn_sigma - 18.0).abs() < 1e-12);

    let unknown = CeimNodeInput {
        contaminant: 9,
        ..node
    };
    let status = unsafe { ceim_kn_window(&unknown, &weights, 86_400.0, &mut out) };
    assert_eq!(status, CeimStatus::Ok);
    assert_eq!(out.kn, 86_400.0);
}

#[test]
fn c_abi_zero_reference_gives_zero_impact() {
    let weights = CeimWeights {
        pfbs: 1.0,
        ecoli: 1.5,
        tp: 1.2,
        tds: 0.8,
    };
    for cref in [0.0, -3.0, f64::NAN] {
        let node = CeimNodeInput {
            baseline_cin: 50.0,
            baseline_cout: 1.0,
            q_cms: 3.0,
            cref,
            contaminant: 2,
        };
        let mut out = CeimOutput { kn: 7.0, kn_sigma: 7.0 };
        let status = unsafe { ceim_kn_window(&node, &weights, 3600.0, &mut out) };
        assert_eq!(status, CeimStatus::Ok);
        assert_eq!(out.kn, 0.0);
        assert_eq!(out.kn_sigma, 0.0);
    }
}

#[test]
fn c_abi_rejects_null_arguments() {
    let node = CeimNodeInput {
        baseline_cin: 1.0,
        baseline_cout: 0.0,
        q_cms: 1.0,
        cref: 1.0,
        contaminant: 0,
    };
    let weights = CeimWeights {
        pfbs: 1.0,
        ecoli: 1.0,
        tp: 1.0,
        tds: 1.0,
    };
    let mut out = CeimOutput { kn: 7.0, kn_sigma: 7.0 };

    unsafe {
        assert_eq!(ceim_kn_window(ptr::null(), &weights, 1.0, &mut out), CeimStatus::Err);
        assert_eq!(ceim_kn_window(&node, ptr::null(), 1.0, &mut out), CeimStatus::Err);
        assert_eq!(ceim_kn_window(&node, &weights, 1.0, ptr::null_mut()), CeimStatus::Err);
    }
    assert_eq!(out.kn, 7.0);
}
