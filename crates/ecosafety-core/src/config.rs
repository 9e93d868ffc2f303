use crate::error::EcoSafetyError;
use crate::hazard::HazardWeights;
use crate::snapshot::{
    ConservationResidual, ConservationTolerances, ContaminantPanel, FlowVacContext,
};
use serde::{Deserialize, Serialize};

pub const DAILY_WINDOW_SECONDS: f64 = 86_400.0;

/// Site quantities measured outside the node-row export.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteConditions {
    pub v_ms: f64,
    pub e_avail_kwh: f64,
    pub bio_stress_index: f64,
}

/// Caller-supplied interior flags for the stability gate. They are taken
/// as given; nothing here derives them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteriorFlags {
    pub previous: bool,
    pub next: bool,
}

/// Everything one certification cycle needs besides the node rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CertificationConfig {
    pub window_seconds: f64,
    pub hazard_weights: HazardWeights,
    pub tolerances: ConservationTolerances,
    pub context: FlowVacContext,
    pub thresholds: ContaminantPanel,
    pub site: SiteConditions,
    pub residual: ConservationResidual,
    /// Potential certified by the previous cycle. `None` on a first cycle,
    /// where there is nothing to be monotone against.
    pub previous_potential: Option<f64>,
    pub interior: InteriorFlags,
}

impl Default for CertificationConfig {
    fn default() -> Self {
        Self {
            window_seconds: DAILY_WINDOW_SECONDS,
            hazard_weights: HazardWeights::phoenix_default(),
            tolerances: ConservationTolerances::default(),
            context: FlowVacContext::Urban,
            thresholds: ContaminantPanel::default_thresholds(),
            site: SiteConditions::default(),
            residual: ConservationResidual::default(),
            previous_potential: None,
            interior: InteriorFlags::default(),
        }
    }
}

impl CertificationConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), EcoSafetyError> {
        check_window(self.window_seconds)?;
        self.hazard_weights.validate()?;
        self.tolerances.validate()?;
        self.thresholds.ensure_positive()?;
        let stress = self.site.bio_stress_index;
        if !(0.0..=1.0).contains(&stress) {
            return Err(EcoSafetyError::StressIndexOutOfRange(stress));
        }
        if self.previous_potential.is_some_and(|v| !v.is_finite()) {
            return Err(EcoSafetyError::NonFinite {
                field: "previous_potential",
            });
        }
        Ok(())
    }
}

pub fn check_window(window_seconds: f64) -> Result<(), EcoSafetyError> {
    if !(window_seconds > 0.0) {
        return Err(EcoSafetyError::NonPositiveWindow(window_seconds));
    }
    Ok(())
}
