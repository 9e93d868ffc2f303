use crate::error::WireError;
use crate::layout::{
    CONSERVATION_FLAG_OFFSET, F64_FIELD_COUNT, FLOWVAC_V1, PADDING_LEN, RECORD_LEN,
};
use crate::record::SafetyStateRecord;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use ecosafety_core::FlowVacContext;

/// Appends exactly [`RECORD_LEN`] bytes. Floats are written bit-for-bit,
/// most significant byte first.
pub fn encode_into<B: BufMut>(record: &SafetyStateRecord, buf: &mut B) {
    buf.put_u8(record.context.tag());
    buf.put_u8(u8::from(record.conservation_ok));
    buf.put_slice(&record.reserved_flags);
    for value in record.f64_fields() {
        buf.put_f64(value);
    }
    buf.put_slice(&record.reserved);
}

pub fn encode(record: &SafetyStateRecord) -> Bytes {
    let mut buf = BytesMut::with_capacity(RECORD_LEN);
    encode_into(record, &mut buf);
    debug_assert_eq!(buf.len(), FLOWVAC_V1.len());
    buf.freeze()
}

/// Reads the first [`RECORD_LEN`] bytes; trailing bytes are ignored. Either
/// the whole record is returned or an error, never a partial record.
pub fn decode(data: &[u8]) -> Result<SafetyStateRecord, WireError> {
    if data.len() < RECORD_LEN {
        return Err(WireError::ShortBuffer {
            needed: RECORD_LEN,
            got: data.len(),
        });
    }
    let mut buf = &data[..RECORD_LEN];

    let tag = buf.get_u8();
    let context = FlowVacContext::from_tag(tag).ok_or(WireError::UnknownContext(tag))?;
    let conservation_ok = match buf.get_u8() {
        0 => false,
        1 => true,
        value => {
            return Err(WireError::InvalidFlag {
                offset: CONSERVATION_FLAG_OFFSET,
                value,
            })
        }
    };
    let mut reserved_flags = [0u8; 2];
    buf.copy_to_slice(&mut reserved_flags);

    let mut floats = [0f64; F64_FIELD_COUNT];
    for slot in floats.iter_mut() {
        *slot = buf.get_f64();
    }

    let mut reserved = [0u8; PADDING_LEN];
    buf.copy_to_slice(&mut reserved);
    debug_assert!(!buf.has_remaining());

    let mut record = SafetyStateRecord {
        context,
        conservation_ok,
        reserved_flags,
        reserved,
        ..SafetyStateRecord::default()
    };
    record.set_f64_fields(floats);
    Ok(record)
}
