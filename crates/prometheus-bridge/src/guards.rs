use crate::EcoSafetyMetrics;
use ecosafety_gates::{ConservationVerdict, StabilityVerdict};
use tracing::warn;

pub const CONSERVATION_GATE: &str = "conservation";
pub const STABILITY_GATE: &str = "stability";

/// Publishes both gate outcomes and returns true when the cycle must be
/// rejected.
pub fn reject_if_gate_failed(
    metrics: &EcoSafetyMetrics,
    site_id: &str,
    conservation: &ConservationVerdict,
    stability: &StabilityVerdict,
) -> bool {
    metrics.observe_gate(site_id, CONSERVATION_GATE, conservation.passed());
    metrics.observe_gate(site_id, STABILITY_GATE, stability.passed());

    if !conservation.passed() {
        warn!(site_id, reason = %conservation, "conservation gate failed");
    }
    if !stability.passed() {
        warn!(site_id, reason = %stability, "stability gate failed");
    }
    !(conservation.passed() && stability.passed())
}
