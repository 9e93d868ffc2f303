use crate::error::EcoSafetyError;
use crate::node_row::TrackedContaminant;
use serde::{Deserialize, Serialize};

/// Deployment context; selects context-specific thresholds downstream.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowVacContext {
    #[default]
    Urban,
    Coastal,
}

impl FlowVacContext {
    pub fn tag(self) -> u8 {
        match self {
            FlowVacContext::Urban => 0,
            FlowVacContext::Coastal => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(FlowVacContext::Urban),
            1 => Some(FlowVacContext::Coastal),
            _ => None,
        }
    }
}

/// One value per tracked contaminant, used for both measured
/// concentrations and reference thresholds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ContaminantPanel {
    pub pfbs_ng_l: f64,
    pub ecoli_mpn_100ml: f64,
    pub tp_mg_l: f64,
    pub tds_mg_l: f64,
}

impl ContaminantPanel {
    /// Regulatory-style defaults: PFBS ng/L, E. coli MPN/100 mL, TP and TDS mg/L.
    pub fn default_thresholds() -> Self {
        Self {
            pfbs_ng_l: 2000.0,
            ecoli_mpn_100ml: 126.0,
            tp_mg_l: 0.1,
            tds_mg_l: 500.0,
        }
    }

    pub fn get(&self, c: TrackedContaminant) -> f64 {
        match c {
            TrackedContaminant::Pfbs => self.pfbs_ng_l,
            TrackedContaminant::EColi => self.ecoli_mpn_100ml,
            TrackedContaminant::Tp => self.tp_mg_l,
            TrackedContaminant::Tds => self.tds_mg_l,
        }
    }

    pub fn set(&mut self, c: TrackedContaminant, value: f64) {
        match c {
            TrackedContaminant::Pfbs => self.pfbs_ng_l = value,
            TrackedContaminant::EColi => self.ecoli_mpn_100ml = value,
            TrackedContaminant::Tp => self.tp_mg_l = value,
            TrackedContaminant::Tds => self.tds_mg_l = value,
        }
    }

    pub fn values(&self) -> [f64; 4] {
        [self.pfbs_ng_l, self.ecoli_mpn_100ml, self.tp_mg_l, self.tds_mg_l]
    }

    pub fn ensure_positive(&self) -> Result<(), EcoSafetyError> {
        for c in TrackedContaminant::ALL {
            let value = self.get(c);
            // NaN fails this comparison too.
            if !(value > 0.0) {
                return Err(EcoSafetyError::NonPositiveReference {
                    contaminant: c.name().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Hydraulics {
    pub q_m3s: f64,
    pub v_ms: f64,
    pub e_avail_kwh: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SafetyIndices {
    /// Expected change in node impact Kn over the window.
    pub kn_delta: f64,
    /// CPVM viability scalar.
    pub cpvm_value: f64,
    /// Composite stress index in [0, 1].
    pub bio_stress_index: f64,
}

/// Mass/energy residual of a proposed state transition.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ConservationResidual {
    pub delta_mass: f64,
    pub delta_energy: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConservationTolerances {
    pub mass: f64,
    pub energy: f64,
}

impl ConservationTolerances {
    /// Mass tolerance is two-sided and must be non-negative. Energy tolerance
    /// is one-sided; a negative value demands net dissipation.
    pub fn new(mass: f64, energy: f64) -> Result<Self, EcoSafetyError> {
        let tolerances = Self { mass, energy };
        tolerances.validate()?;
        Ok(tolerances)
    }

    pub fn validate(&self) -> Result<(), EcoSafetyError> {
        if !self.mass.is_finite() {
            return Err(EcoSafetyError::NonFinite {
                field: "mass_tolerance",
            });
        }
        if !self.energy.is_finite() {
            return Err(EcoSafetyError::NonFinite {
                field: "energy_tolerance",
            });
        }
        if self.mass < 0.0 {
            return Err(EcoSafetyError::NegativeTolerance {
                name: "mass",
                value: self.mass,
            });
        }
        Ok(())
    }
}

impl Default for ConservationTolerances {
    fn default() -> Self {
        Self {
            mass: 0.01,
            energy: 0.0,
        }
    }
}

/// Consolidated safety state for one certification cycle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SafetySnapshot {
    pub context: FlowVacContext,
    pub concentrations: ContaminantPanel,
    pub thresholds: ContaminantPanel,
    pub hydraulics: Hydraulics,
    pub indices: SafetyIndices,
}

impl SafetySnapshot {
    pub fn validate(&self) -> Result<(), EcoSafetyError> {
        self.thresholds.ensure_positive()?;
        // NaN fails this comparison too.
        if !(self.hydraulics.q_m3s >= 0.0) {
            return Err(EcoSafetyError::NegativeFlow(self.hydraulics.q_m3s));
        }
        let stress = self.indices.bio_stress_index;
        if !(0.0..=1.0).contains(&stress) {
            return Err(EcoSafetyError::StressIndexOutOfRange(stress));
        }
        Ok(())
    }
}
