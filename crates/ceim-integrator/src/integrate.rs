use ecosafety_core::{check_window, EcoSafetyError, HazardWeights, NodeRow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fraction of `sqrt(|Kn|)` reported as the uncertainty proxy.
pub const KN_SIGMA_FRACTION: f64 = 0.05;

/// Impact of one node/contaminant pair over one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub node_id: String,
    pub contaminant: String,
    pub kn: f64,
    pub kn_sigma: f64,
}

/// `Kn = weight * ratio * Q * window`, unclamped. Negative values mean the
/// node added contamination over the window.
pub fn windowed_kn(weight: f64, ratio: f64, q_cms: f64, window_seconds: f64) -> f64 {
    let volume = q_cms * window_seconds;
    weight * ratio * volume
}

pub fn kn_sigma(kn: f64) -> f64 {
    kn.abs().sqrt() * KN_SIGMA_FRACTION
}

/// Per-row transform. Total: never fails, NaN/Inf inputs propagate.
pub fn integrate_row(row: &NodeRow, weights: &HazardWeights, window_seconds: f64) -> ImpactResult {
    if !weights.is_known(&row.contaminant) {
        debug!(
            node_id = %row.node_id,
            contaminant = %row.contaminant,
            "contaminant not in hazard table, using default weight"
        );
    }
    if !row.has_reference() {
        debug!(
            node_id = %row.node_id,
            cref = row.cref,
            "non-positive reference, ratio forced to zero"
        );
    }

    let weight = weights.weight_for(&row.contaminant);
    let kn = windowed_kn(weight, row.load_ratio(), row.q_cms, window_seconds);

    ImpactResult {
        node_id: row.node_id.clone(),
        contaminant: row.contaminant.clone(),
        kn,
        kn_sigma: kn_sigma(kn),
    }
}

/// One [`ImpactResult`] per row, in row order. Rows are independent, so
/// callers may split the slice across workers and concatenate the outputs.
pub fn integrate_window(
    rows: &[NodeRow],
    weights: &HazardWeights,
    window_seconds: f64,
) -> Result<Vec<ImpactResult>, EcoSafetyError> {
    check_window(window_seconds)?;
    weights.validate()?;

    let results: Vec<ImpactResult> = rows
        .iter()
        .map(|row| integrate_row(row, weights, window_seconds))
        .collect();

    debug!(rows = rows.len(), window_seconds, "CEIM window integrated");
    Ok(results)
}

pub fn total_kn(results: &[ImpactResult]) -> f64 {
    results.iter().map(|r| r.kn).sum()
}
