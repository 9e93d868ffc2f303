pub mod ffi;
pub mod integrate;
#[cfg(test)]
mod tests;

pub use ffi::{ceim_kn_window, CeimNodeInput, CeimOutput, CeimStatus, CeimWeights};
pub use integrate::{
    integrate_row, integrate_window, kn_sigma, total_kn, windowed_kn, ImpactResult,
    KN_SIGMA_FRACTION,
};
