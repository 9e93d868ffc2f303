//! Cross-boundary state step. Status codes only, never a panic or `Result`.

use crate::state::AccumulatedState;
use crate::step::step;
use ecosafety_core::{load_ratio, NodeRow};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpvmStatus {
    Ok = 0,
    Err = 1,
}

/// Numeric fields of a node row as laid out by foreign callers.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CpvmNodeInput {
    pub baseline_cin: f64,
    pub baseline_cout: f64,
    pub q_cms: f64,
    pub cref: f64,
}

impl CpvmNodeInput {
    fn contribution(&self) -> AccumulatedState {
        let ratio = load_ratio(self.baseline_cin, self.baseline_cout, self.cref);
        AccumulatedState {
            state_mass: ratio * self.q_cms,
            state_risk: ratio,
        }
    }
}

/// Rust-side form of the boundary call: missing arguments become
/// [`CpvmStatus::Err`] and leave `state_out` untouched.
pub fn step_into(
    row: Option<&NodeRow>,
    state_in: Option<&AccumulatedState>,
    state_out: Option<&mut AccumulatedState>,
) -> CpvmStatus {
    match (row, state_in, state_out) {
        (Some(row), Some(state_in), Some(state_out)) => {
            *state_out = step(row, state_in);
            CpvmStatus::Ok
        }
        _ => CpvmStatus::Err,
    }
}

/// # Safety
///
/// Each non-null pointer must be valid and aligned for its type for the
/// duration of the call. `state_out` may alias `state_in`.
#[no_mangle]
pub unsafe extern "C" fn cpvm_step(
    node: *const CpvmNodeInput,
    state_in: *const AccumulatedState,
    state_out: *mut AccumulatedState,
) -> CpvmStatus {
    if node.is_null() || state_in.is_null() || state_out.is_null() {
        return CpvmStatus::Err;
    }
    let contribution = (*node).contribution();
    let prev = *state_in;
    *state_out = prev + contribution;
    CpvmStatus::Ok
}
