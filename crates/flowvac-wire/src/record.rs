use crate::layout::{F64_FIELD_COUNT, PADDING_LEN};
use ecosafety_core::{
    ConservationResidual, ConservationTolerances, ContaminantPanel, EcoSafetyError,
    FlowVacContext, Hydraulics, SafetyIndices, SafetySnapshot,
};
use ecosafety_gates::ConservationVerdict;
use serde::{Deserialize, Serialize};

/// The unit of persistence: one per certification cycle, immutable once
/// encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyStateRecord {
    pub context: FlowVacContext,
    pub conservation_ok: bool,
    pub reserved_flags: [u8; 2],
    pub concentrations: ContaminantPanel,
    pub thresholds: ContaminantPanel,
    pub hydraulics: Hydraulics,
    pub indices: SafetyIndices,
    pub residual: ConservationResidual,
    pub reserved: [u8; PADDING_LEN],
}

impl SafetyStateRecord {
    /// Validates the snapshot and stamps the conservation flag from the gate.
    pub fn certify(
        snapshot: &SafetySnapshot,
        residual: ConservationResidual,
        tolerances: &ConservationTolerances,
    ) -> Result<Self, EcoSafetyError> {
        snapshot.validate()?;
        tolerances.validate()?;
        let verdict = ConservationVerdict::evaluate(&residual, tolerances);

        Ok(Self {
            context: snapshot.context,
            conservation_ok: verdict.passed(),
            reserved_flags: [0; 2],
            concentrations: snapshot.concentrations,
            thresholds: snapshot.thresholds,
            hydraulics: snapshot.hydraulics,
            indices: snapshot.indices,
            residual,
            reserved: [0; PADDING_LEN],
        })
    }

    pub fn snapshot(&self) -> SafetySnapshot {
        SafetySnapshot {
            context: self.context,
            concentrations: self.concentrations,
            thresholds: self.thresholds,
            hydraulics: self.hydraulics,
            indices: self.indices,
        }
    }

    /// Float fields in wire order.
    pub fn f64_fields(&self) -> [f64; F64_FIELD_COUNT] {
        let c = self.concentrations.values();
        let r = self.thresholds.values();
        [
            c[0],
            c[1],
            c[2],
            c[3],
            r[0],
            r[1],
            r[2],
            r[3],
            self.hydraulics.q_m3s,
            self.hydraulics.v_ms,
            self.hydraulics.e_avail_kwh,
            self.indices.kn_delta,
            self.indices.cpvm_value,
            self.indices.bio_stress_index,
            self.residual.delta_mass,
            self.residual.delta_energy,
        ]
    }

    pub(crate) fn set_f64_fields(&mut self, v: [f64; F64_FIELD_COUNT]) {
        self.concentrations = ContaminantPanel {
            pfbs_ng_l: v[0],
            ecoli_mpn_100ml: v[1],
            tp_mg_l: v[2],
            tds_mg_l: v[3],
        };
        self.thresholds = ContaminantPanel {
            pfbs_ng_l: v[4],
            ecoli_mpn_100ml: v[5],
            tp_mg_l: v[6],
            tds_mg_l: v[7],
        };
        self.hydraulics = Hydraulics {
            q_m3s: v[8],
            v_ms: v[9],
            e_avail_kwh: v[10],
        };
        self.indices = SafetyIndices {
            kn_delta: v[11],
            cpvm_value: v[12],
            bio_stress_index: v[13],
        };
        self.residual = ConservationResidual {
            delta_mass: v[14],
            delta_energy: v[15],
        };
    }

    /// Field-for-field equality on bit patterns, so NaN payloads and signed
    /// zeros compare exactly.
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        self.context == other.context
            && self.conservation_ok == other.conservation_ok
            && self.reserved_flags == other.reserved_flags
            && self.reserved == other.reserved
            && self
                .f64_fields()
                .iter()
                .zip(other.f64_fields().iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}
