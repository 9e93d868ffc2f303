use crate::pipeline::CertificationOutcome;
use ceim_integrator::ImpactResult;
use chrono::{DateTime, Utc};
use cpvm_accumulator::AccumulatedState;
use ecosafety_gates::{ConservationVerdict, StabilityVerdict};
use serde::Serialize;

/// Dated summary of one certification cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CertificationReport {
    pub date: String,
    pub generated_at: DateTime<Utc>,
    pub site_id: String,
    pub window_seconds: f64,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub impacts: Vec<ImpactResult>,
    pub final_state: AccumulatedState,
    pub potential: f64,
    pub conservation: ConservationVerdict,
    pub conservation_reason: String,
    pub stability: StabilityVerdict,
    pub stability_reason: String,
    pub certified: bool,
    pub record_hex: String,
}

impl CertificationReport {
    pub fn from_outcome(
        site_id: &str,
        window_seconds: f64,
        rows_skipped: usize,
        outcome: &CertificationOutcome,
    ) -> Self {
        let generated_at = Utc::now();
        Self {
            date: generated_at.format("%Y-%m-%d").to_string(),
            generated_at,
            site_id: site_id.to_string(),
            window_seconds,
            rows_loaded: outcome.impacts.len(),
            rows_skipped,
            impacts: outcome.impacts.clone(),
            final_state: outcome.state,
            potential: outcome.potential,
            conservation: outcome.conservation,
            conservation_reason: outcome.conservation.to_string(),
            stability: outcome.stability,
            stability_reason: outcome.stability.to_string(),
            certified: outcome.certified(),
            record_hex: hex::encode(&outcome.encoded),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
