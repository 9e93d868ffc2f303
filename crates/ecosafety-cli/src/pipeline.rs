use bytes::Bytes;
use ceim_integrator::{integrate_window, total_kn, ImpactResult};
use cpvm_accumulator::{accumulate, AccumulatedState};
use ecosafety_core::{
    CertificationConfig, ContaminantPanel, EcoSafetyError, HazardWeights, Hydraulics, NodeRow,
    SafetyIndices, SafetySnapshot, TrackedContaminant,
};
use ecosafety_gates::{
    compute_potential, ConservationVerdict, GateError, ResidualState, RiskCoordinate,
    StabilityVerdict,
};
use flowvac_wire::{encode, SafetyStateRecord};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] EcoSafetyError),
    #[error("invariant evaluation failed: {0}")]
    Gate(#[from] GateError),
}

/// Everything one certification cycle produced.
#[derive(Debug, Clone)]
pub struct CertificationOutcome {
    pub impacts: Vec<ImpactResult>,
    pub state: AccumulatedState,
    pub coordinates: Vec<RiskCoordinate>,
    pub potential: f64,
    pub conservation: ConservationVerdict,
    pub stability: StabilityVerdict,
    pub record: SafetyStateRecord,
    pub encoded: Bytes,
}

impl CertificationOutcome {
    pub fn certified(&self) -> bool {
        self.conservation.passed() && self.stability.passed()
    }
}

/// Mean outlet concentration per tracked contaminant; zero when no row
/// reports it.
pub fn outlet_panel(rows: &[NodeRow]) -> ContaminantPanel {
    let mut panel = ContaminantPanel::default();
    for c in TrackedContaminant::ALL {
        let (sum, count) = rows
            .iter()
            .filter(|r| r.tracked() == Some(c))
            .fold((0.0, 0usize), |(sum, n), r| (sum + r.baseline_cout, n + 1));
        if count > 0 {
            panel.set(c, sum / count as f64);
        }
    }
    panel
}

/// Flow summed over distinct nodes, taking each node's first row.
pub fn site_flow(rows: &[NodeRow]) -> f64 {
    let mut seen = BTreeSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.node_id.as_str()))
        .map(|r| r.q_cms)
        .sum()
}

/// One coordinate per tracked contaminant on the `[0, 1]` corridor, with
/// `r = C / Cref`.
pub fn risk_coordinates(
    concentrations: &ContaminantPanel,
    thresholds: &ContaminantPanel,
    weights: &HazardWeights,
) -> Result<Vec<RiskCoordinate>, EcoSafetyError> {
    thresholds.ensure_positive()?;
    TrackedContaminant::ALL
        .into_iter()
        .map(|c| {
            RiskCoordinate::unit(
                concentrations.get(c) / thresholds.get(c),
                weights.weight_for(c.name()),
            )
        })
        .collect()
}

pub fn certify(
    rows: &[NodeRow],
    cfg: &CertificationConfig,
) -> Result<CertificationOutcome, PipelineError> {
    cfg.validate()?;

    let impacts = integrate_window(rows, &cfg.hazard_weights, cfg.window_seconds)?;
    let state = accumulate(rows, AccumulatedState::ZERO);

    let concentrations = outlet_panel(rows);
    let coordinates = risk_coordinates(&concentrations, &cfg.thresholds, &cfg.hazard_weights)?;
    let potential = compute_potential(&coordinates)?;
    let stability = StabilityVerdict::evaluate(
        &ResidualState::new(
            cfg.previous_potential.unwrap_or(potential),
            cfg.interior.previous,
        ),
        &ResidualState::new(potential, cfg.interior.next),
        &coordinates,
    );

    let snapshot = SafetySnapshot {
        context: cfg.context,
        concentrations,
        thresholds: cfg.thresholds,
        hydraulics: Hydraulics {
            q_m3s: site_flow(rows),
            v_ms: cfg.site.v_ms,
            e_avail_kwh: cfg.site.e_avail_kwh,
        },
        indices: SafetyIndices {
            kn_delta: total_kn(&impacts),
            cpvm_value: state.state_risk,
            bio_stress_index: cfg.site.bio_stress_index,
        },
    };
    let record = SafetyStateRecord::certify(&snapshot, cfg.residual, &cfg.tolerances)?;
    let conservation = ConservationVerdict::evaluate(&cfg.residual, &cfg.tolerances);
    let encoded = encode(&record);

    info!(
        rows = rows.len(),
        kn_delta = snapshot.indices.kn_delta,
        potential,
        conservation = %conservation,
        stability = %stability,
        "certification cycle complete"
    );

    Ok(CertificationOutcome {
        impacts,
        state,
        coordinates,
        potential,
        conservation,
        stability,
        record,
        encoded,
    })
}
