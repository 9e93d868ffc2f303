pub mod codec;
pub mod error;
pub mod layout;
pub mod record;

pub use codec::{decode, encode, encode_into};
pub use error::WireError;
pub use layout::{FieldKind, FieldSpec, WireLayout, FLOWVAC_V1, RECORD_LEN};
pub use record::SafetyStateRecord;
