use ecosafety_core::{ConservationResidual, ConservationTolerances};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum-reflection check: mass is two-sided, energy one-sided.
pub fn satisfies_conservation(
    residual: &ConservationResidual,
    mass_tolerance: f64,
    energy_tolerance: f64,
) -> bool {
    let mass_ok = residual.delta_mass.abs() <= mass_tolerance;
    let energy_ok = residual.delta_energy <= energy_tolerance;
    mass_ok && energy_ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConservationVerdict {
    pub mass_ok: bool,
    pub energy_ok: bool,
}

impl ConservationVerdict {
    pub fn evaluate(residual: &ConservationResidual, tolerances: &ConservationTolerances) -> Self {
        Self {
            mass_ok: residual.delta_mass.abs() <= tolerances.mass,
            energy_ok: residual.delta_energy <= tolerances.energy,
        }
    }

    pub fn passed(&self) -> bool {
        self.mass_ok && self.energy_ok
    }
}

impl fmt::Display for ConservationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mass_ok, self.energy_ok) {
            (true, true) => write!(f, "ok"),
            (false, true) => write!(f, "net mass change exceeds tolerance"),
            (true, false) => write!(f, "energy created beyond tolerance"),
            (false, false) => write!(f, "mass and energy residuals exceed tolerance"),
        }
    }
}
