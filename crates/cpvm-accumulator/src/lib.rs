pub mod ffi;
pub mod state;
pub mod step;

pub use ffi::{cpvm_step, step_into, CpvmNodeInput, CpvmStatus};
pub use state::AccumulatedState;
pub use step::{accumulate, accumulate_partitioned, contribution, step};
