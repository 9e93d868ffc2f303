use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Running CPVM state: cumulative mass-load and cumulative risk.
///
/// Only [`AccumulatedState::ZERO`] starts a new run; steps never reset it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccumulatedState {
    pub state_mass: f64,
    pub state_risk: f64,
}

impl AccumulatedState {
    pub const ZERO: AccumulatedState = AccumulatedState {
        state_mass: 0.0,
        state_risk: 0.0,
    };

    pub fn new(state_mass: f64, state_risk: f64) -> Self {
        Self {
            state_mass,
            state_risk,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.state_mass.is_finite() && self.state_risk.is_finite()
    }

    /// Combines two partial sums over disjoint row sets.
    pub fn merge(self, other: AccumulatedState) -> AccumulatedState {
        AccumulatedState {
            state_mass: self.state_mass + other.state_mass,
            state_risk: self.state_risk + other.state_risk,
        }
    }
}

impl Add for AccumulatedState {
    type Output = AccumulatedState;

    fn add(self, rhs: AccumulatedState) -> AccumulatedState {
        self.merge(rhs)
    }
}

impl AddAssign for AccumulatedState {
    fn add_assign(&mut self, rhs: AccumulatedState) {
        *self = self.merge(rhs);
    }
}
