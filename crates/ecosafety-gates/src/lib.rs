pub mod conservation;
pub mod error;
pub mod stability;

pub use conservation::{satisfies_conservation, ConservationVerdict};
pub use error::GateError;
pub use stability::{
    compute_potential, corridor_present, safe_step, ResidualState, RiskCoordinate,
    StabilityVerdict, POTENTIAL_SLACK,
};
