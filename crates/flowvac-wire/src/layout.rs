//! FlowVac safety-state wire layout, v1.
//!
//! The layout is declared as data and checked at compile time; nothing
//! relies on the in-memory layout of [`crate::SafetyStateRecord`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Byte,
    F64Be,
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub kind: FieldKind,
}

const fn byte(name: &'static str, offset: usize) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        width: 1,
        kind: FieldKind::Byte,
    }
}

const fn f64_be(name: &'static str, index: usize) -> FieldSpec {
    FieldSpec {
        name,
        offset: HEADER_LEN + index * 8,
        width: 8,
        kind: FieldKind::F64Be,
    }
}

pub const HEADER_LEN: usize = 4;
pub const F64_FIELD_COUNT: usize = 16;
pub const PADDING_LEN: usize = 16;
pub const PADDING_OFFSET: usize = HEADER_LEN + F64_FIELD_COUNT * 8;
pub const RECORD_LEN: usize = PADDING_OFFSET + PADDING_LEN;

pub const CONTEXT_OFFSET: usize = 0;
pub const CONSERVATION_FLAG_OFFSET: usize = 1;

#[derive(Debug, Clone, Copy)]
pub struct WireLayout {
    pub version: u8,
    pub fields: &'static [FieldSpec],
}

impl WireLayout {
    pub const fn len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].width;
            i += 1;
        }
        total
    }

    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every field starts where the previous one ended.
    pub const fn is_contiguous(&self) -> bool {
        let mut cursor = 0;
        let mut i = 0;
        while i < self.fields.len() {
            if self.fields[i].offset != cursor {
                return false;
            }
            cursor += self.fields[i].width;
            i += 1;
        }
        true
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn f64_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.kind == FieldKind::F64Be)
    }
}

pub const FLOWVAC_V1_FIELDS: [FieldSpec; 4 + F64_FIELD_COUNT + 1] = [
    byte("context", CONTEXT_OFFSET),
    byte("qr_ok", CONSERVATION_FLAG_OFFSET),
    byte("reserved_flags1", 2),
    byte("reserved_flags2", 3),
    f64_be("c_pfbs_ng_l", 0),
    f64_be("c_ecoli_mpn_100ml", 1),
    f64_be("c_tp_mg_l", 2),
    f64_be("c_tds_mg_l", 3),
    f64_be("cref_pfbs_ng_l", 4),
    f64_be("cref_ecoli_mpn_100ml", 5),
    f64_be("cref_tp_mg_l", 6),
    f64_be("cref_tds_mg_l", 7),
    f64_be("q_m3s", 8),
    f64_be("v_ms", 9),
    f64_be("e_avail_kwh", 10),
    f64_be("kn_delta", 11),
    f64_be("cpvm_value", 12),
    f64_be("bio_stress_index", 13),
    f64_be("qr_delta_mass", 14),
    f64_be("qr_delta_energy", 15),
    FieldSpec {
        name: "reserved",
        offset: PADDING_OFFSET,
        width: PADDING_LEN,
        kind: FieldKind::Reserved,
    },
];

pub const FLOWVAC_V1: WireLayout = WireLayout {
    version: 1,
    fields: &FLOWVAC_V1_FIELDS,
};

const _: () = assert!(FLOWVAC_V1.len() == RECORD_LEN);
const _: () = assert!(FLOWVAC_V1.is_contiguous());
const _: () = assert!(RECORD_LEN == 148);
