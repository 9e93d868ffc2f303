use serde::{Deserialize, Serialize};

/// Contaminants carried in the fixed safety-state record, in record order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackedContaminant {
    Pfbs,
    EColi,
    Tp,
    Tds,
}

impl TrackedContaminant {
    pub const ALL: [TrackedContaminant; 4] = [
        TrackedContaminant::Pfbs,
        TrackedContaminant::EColi,
        TrackedContaminant::Tp,
        TrackedContaminant::Tds,
    ];

    /// Name as it appears in node-row exports.
    pub fn name(self) -> &'static str {
        match self {
            TrackedContaminant::Pfbs => "PFBS",
            TrackedContaminant::EColi => "EColi",
            TrackedContaminant::Tp => "TP",
            TrackedContaminant::Tds => "TDS",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// One measurement row per (node, contaminant, window). Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    pub node_id: String,
    pub location: String,
    pub system: String,
    pub contaminant: String,
    pub parameter: String,
    pub unit: String,
    pub baseline_cin: f64,
    pub baseline_cout: f64,
    /// Volumetric flow, m3/s.
    pub q_cms: f64,
    pub cref: f64,
    pub wsup: f64,
    pub eco_impact_score: f64,
    pub karma_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Normalized removal ratio `(Cin - Cout) / Cref`.
///
/// A non-positive (or NaN) reference limit means no normalization is
/// possible and yields exactly `0.0`. Other non-finite inputs propagate.
pub fn load_ratio(cin: f64, cout: f64, cref: f64) -> f64 {
    if cref > 0.0 {
        (cin - cout) / cref
    } else {
        0.0
    }
}

impl NodeRow {
    pub fn load_ratio(&self) -> f64 {
        load_ratio(self.baseline_cin, self.baseline_cout, self.cref)
    }

    pub fn has_reference(&self) -> bool {
        self.cref > 0.0
    }

    pub fn tracked(&self) -> Option<TrackedContaminant> {
        TrackedContaminant::from_name(&self.contaminant)
    }
}
