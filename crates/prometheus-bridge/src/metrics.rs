use ceim_integrator::ImpactResult;
use cpvm_accumulator::AccumulatedState;
use prometheus::{GaugeVec, Opts, Registry};

pub struct EcoSafetyMetrics {
    pub ceim_node_kn: GaugeVec,
    pub ceim_node_kn_sigma: GaugeVec,
    pub cpvm_state_mass: GaugeVec,
    pub cpvm_state_risk: GaugeVec,
    pub ecosafety_gate_pass: GaugeVec,
}

fn gauge_vec(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<GaugeVec, prometheus::Error> {
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl EcoSafetyMetrics {
    /// Registers every gauge into `registry`. Registering twice into the
    /// same registry is an error.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        Ok(Self {
            ceim_node_kn: gauge_vec(
                registry,
                "ceim_node_kn",
                "Windowed CEIM impact Kn per node and contaminant",
                &["node_id", "contaminant"],
            )?,
            ceim_node_kn_sigma: gauge_vec(
                registry,
                "ceim_node_kn_sigma",
                "Uncertainty of the CEIM impact Kn",
                &["node_id", "contaminant"],
            )?,
            cpvm_state_mass: gauge_vec(
                registry,
                "cpvm_state_mass",
                "Cumulative CPVM mass-load",
                &["site_id"],
            )?,
            cpvm_state_risk: gauge_vec(
                registry,
                "cpvm_state_risk",
                "Cumulative CPVM risk",
                &["site_id"],
            )?,
            ecosafety_gate_pass: gauge_vec(
                registry,
                "ecosafety_gate_pass",
                "1 when the gate passed in the last certification cycle, else 0",
                &["site_id", "gate"],
            )?,
        })
    }

    pub fn observe_impacts(&self, results: &[ImpactResult]) {
        for r in results {
            let labels = [r.node_id.as_str(), r.contaminant.as_str()];
            self.ceim_node_kn.with_label_values(&labels).set(r.kn);
            self.ceim_node_kn_sigma
                .with_label_values(&labels)
                .set(r.kn_sigma);
        }
    }

    pub fn observe_state(&self, site_id: &str, state: &AccumulatedState) {
        self.cpvm_state_mass
            .with_label_values(&[site_id])
            .set(state.state_mass);
        self.cpvm_state_risk
            .with_label_values(&[site_id])
            .set(state.state_risk);
    }

    pub fn observe_gate(&self, site_id: &str, gate: &str, passed: bool) {
        self.ecosafety_gate_pass
            .with_label_values(&[site_id, gate])
            .set(if passed { 1.0 } else { 0.0 });
    }
}
