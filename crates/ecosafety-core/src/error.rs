use thiserror::Error;

/// Configuration errors raised at the call that receives the bad value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EcoSafetyError {
    #[error("integration window must be positive, got {0} s")]
    NonPositiveWindow(f64),
    #[error("reference threshold for {contaminant} must be positive, got {value}")]
    NonPositiveReference { contaminant: String, value: f64 },
    #[error("volumetric flow must be non-negative, got {0} m3/s")]
    NegativeFlow(f64),
    #[error("hazard weight for {contaminant} must be non-negative, got {weight}")]
    NegativeHazardWeight { contaminant: String, weight: f64 },
    #[error("{name} tolerance must be non-negative, got {value}")]
    NegativeTolerance { name: &'static str, value: f64 },
    #[error("bio stress index must lie in [0, 1], got {0}")]
    StressIndexOutOfRange(f64),
    #[error("corridor requires rmax > rmin, got [{rmin}, {rmax}]")]
    InvalidCorridor { rmin: f64, rmax: f64 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
}
