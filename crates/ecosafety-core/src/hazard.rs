use crate::error::EcoSafetyError;
use crate::node_row::TrackedContaminant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight applied to contaminants the table does not list.
pub const DEFAULT_HAZARD_WEIGHT: f64 = 1.0;

/// Per-contaminant hazard weights. The table is advisory, not exhaustive:
/// lookups of unknown names fall back to [`DEFAULT_HAZARD_WEIGHT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HazardWeights {
    weights: BTreeMap<String, f64>,
}

impl HazardWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weights used by the Phoenix daily CEIM run.
    pub fn phoenix_default() -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(TrackedContaminant::Pfbs.name().to_string(), 1.0);
        weights.insert(TrackedContaminant::EColi.name().to_string(), 1.5);
        weights.insert(TrackedContaminant::Tp.name().to_string(), 1.2);
        weights.insert(TrackedContaminant::Tds.name().to_string(), 0.8);
        Self { weights }
    }

    pub fn insert(
        &mut self,
        contaminant: impl Into<String>,
        weight: f64,
    ) -> Result<Option<f64>, EcoSafetyError> {
        let contaminant = contaminant.into();
        check_weight(&contaminant, weight)?;
        Ok(self.weights.insert(contaminant, weight))
    }

    pub fn with_weight(
        mut self,
        contaminant: impl Into<String>,
        weight: f64,
    ) -> Result<Self, EcoSafetyError> {
        self.insert(contaminant, weight)?;
        Ok(self)
    }

    pub fn weight_for(&self, contaminant: &str) -> f64 {
        self.weights
            .get(contaminant)
            .copied()
            .unwrap_or(DEFAULT_HAZARD_WEIGHT)
    }

    pub fn is_known(&self, contaminant: &str) -> bool {
        self.weights.contains_key(contaminant)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Re-checks a table that bypassed [`HazardWeights::insert`], e.g. one
    /// deserialized from a config file.
    pub fn validate(&self) -> Result<(), EcoSafetyError> {
        self.weights
            .iter()
            .try_for_each(|(name, &weight)| check_weight(name, weight))
    }
}

fn check_weight(contaminant: &str, weight: f64) -> Result<(), EcoSafetyError> {
    if !weight.is_finite() {
        return Err(EcoSafetyError::NonFinite {
            field: "hazard_weight",
        });
    }
    if weight < 0.0 {
        return Err(EcoSafetyError::NegativeHazardWeight {
            contaminant: contaminant.to_string(),
            weight,
        });
    }
    Ok(())
}
