pub mod guards;
pub mod metrics;

pub use guards::{reject_if_gate_failed, CONSERVATION_GATE, STABILITY_GATE};
pub use metrics::EcoSafetyMetrics;
