use crate::error::GateError;
use ecosafety_core::EcoSafetyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowed increase of the potential between two exterior steps.
pub const POTENTIAL_SLACK: f64 = 1e-9;

/// Normalized risk value with its hazard weight and corridor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskCoordinate {
    pub rx: f64,
    pub w: f64,
    pub rmin: f64,
    pub rmax: f64,
}

impl RiskCoordinate {
    pub fn new(rx: f64, w: f64, rmin: f64, rmax: f64) -> Result<Self, EcoSafetyError> {
        if !(w >= 0.0) {
            return Err(EcoSafetyError::NegativeHazardWeight {
                contaminant: "risk coordinate".into(),
                weight: w,
            });
        }
        if !(rmax > rmin) {
            return Err(EcoSafetyError::InvalidCorridor { rmin, rmax });
        }
        Ok(Self { rx, w, rmin, rmax })
    }

    /// Coordinate on the usual `[0, 1]` corridor.
    pub fn unit(rx: f64, w: f64) -> Result<Self, EcoSafetyError> {
        Self::new(rx, w, 0.0, 1.0)
    }

    /// NaN risk values are never inside.
    pub fn in_corridor(&self) -> bool {
        self.rmin <= self.rx && self.rx <= self.rmax
    }
}

/// Potential value at one step plus the caller's interior flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualState {
    pub vt: f64,
    pub inside_interior: bool,
}

impl ResidualState {
    pub fn new(vt: f64, inside_interior: bool) -> Self {
        Self { vt, inside_interior }
    }
}

/// `V = Σ w·r²`.
pub fn compute_potential(coords: &[RiskCoordinate]) -> Result<f64, GateError> {
    coords.iter().enumerate().try_fold(0.0, |v, (index, c)| {
        if c.w < 0.0 {
            return Err(GateError::NegativeWeight { index, weight: c.w });
        }
        Ok(v + c.w * c.rx * c.rx)
    })
}

/// False for an empty set or any degenerate corridor.
pub fn corridor_present(coords: &[RiskCoordinate]) -> bool {
    !coords.is_empty() && coords.iter().all(|c| c.rmax > c.rmin)
}

/// Boolean gate: every coordinate inside its corridor, and outside the
/// interior the potential must not increase by more than [`POTENTIAL_SLACK`].
pub fn safe_step(prev: &ResidualState, next: &ResidualState, coords: &[RiskCoordinate]) -> bool {
    if coords.iter().any(|c| !c.in_corridor()) {
        return false;
    }
    !potential_increased(prev, next)
}

fn potential_increased(prev: &ResidualState, next: &ResidualState) -> bool {
    !prev.inside_interior && !next.inside_interior && next.vt > prev.vt + POTENTIAL_SLACK
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StabilityVerdict {
    Safe,
    NoCorridor,
    CorridorBreach {
        index: usize,
        rx: f64,
        rmin: f64,
        rmax: f64,
    },
    PotentialIncrease {
        prev: f64,
        next: f64,
    },
}

impl StabilityVerdict {
    /// Like [`safe_step`], but an empty or degenerate coordinate set is
    /// reported as [`StabilityVerdict::NoCorridor`] instead of passing.
    pub fn evaluate(
        prev: &ResidualState,
        next: &ResidualState,
        coords: &[RiskCoordinate],
    ) -> Self {
        if !corridor_present(coords) {
            return StabilityVerdict::NoCorridor;
        }
        if let Some((index, c)) = coords.iter().enumerate().find(|(_, c)| !c.in_corridor()) {
            return StabilityVerdict::CorridorBreach {
                index,
                rx: c.rx,
                rmin: c.rmin,
                rmax: c.rmax,
            };
        }
        if potential_increased(prev, next) {
            return StabilityVerdict::PotentialIncrease {
                prev: prev.vt,
                next: next.vt,
            };
        }
        StabilityVerdict::Safe
    }

    pub fn passed(&self) -> bool {
        matches!(self, StabilityVerdict::Safe)
    }
}

impl fmt::Display for StabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilityVerdict::Safe => write!(f, "ok"),
            StabilityVerdict::NoCorridor => write!(f, "no corridor present"),
            StabilityVerdict::CorridorBreach {
                index,
                rx,
                rmin,
                rmax,
            } => write!(f, "coordinate {index} at {rx} outside corridor [{rmin}, {rmax}]"),
            StabilityVerdict::PotentialIncrease { prev, next } => write!(
                f,
                "potential increased outside interior: {prev} -> {next}"
            ),
        }
    }
}
