//! C ABI for hosts that call the integrator one row at a time.
//!
//! Errors cross this boundary as a status code only. `Err` is returned for
//! null arguments; numeric edge cases are computed like everywhere else.

use crate::integrate::{kn_sigma, windowed_kn};
use ecosafety_core::{load_ratio, DEFAULT_HAZARD_WEIGHT};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeimStatus {
    Ok = 0,
    Err = 1,
}

/// Numeric part of a node row. `contaminant`: 0 PFBS, 1 EColi, 2 TP, 3 TDS,
/// anything else is weighted with the default weight.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CeimNodeInput {
    pub baseline_cin: f64,
    pub baseline_cout: f64,
    pub q_cms: f64,
    pub cref: f64,
    pub contaminant: u8,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CeimWeights {
    pub pfbs: f64,
    pub ecoli: f64,
    pub tp: f64,
    pub tds: f64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct CeimOutput {
    pub kn: f64,
    pub kn_sigma: f64,
}

impl CeimWeights {
    fn weight_for(&self, code: u8) -> f64 {
        match code {
            0 => self.pfbs,
            1 => self.ecoli,
            2 => self.tp,
            3 => self.tds,
            _ => DEFAULT_HAZARD_WEIGHT,
        }
    }
}

impl CeimNodeInput {
    fn ratio(&self) -> f64 {
        load_ratio(self.baseline_cin, self.baseline_cout, self.cref)
    }
}

/// # Safety
///
/// Each non-null pointer must be valid and aligned for its type for the
/// duration of the call, and `out` must not alias the inputs.
#[no_mangle]
pub unsafe extern "C" fn ceim_kn_window(
    node: *const CeimNodeInput,
    weights: *const CeimWeights,
    window_seconds: f64,
    out: *mut CeimOutput,
) -> CeimStatus {
    let (Some(node), Some(weights), Some(out)) = (node.as_ref(), weights.as_ref(), out.as_mut())
    else {
        return CeimStatus::Err;
    };

    let kn = windowed_kn(
        weights.weight_for(node.contaminant),
        node.ratio(),
        node.q_cms,
        window_seconds,
    );
    out.kn = kn;
    out.kn_sigma = kn_sigma(kn);
    CeimStatus::Ok
}
