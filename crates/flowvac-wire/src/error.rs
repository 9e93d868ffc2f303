use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("buffer too short for safety-state record: need {needed} bytes, got {got}")]
    ShortBuffer { needed: usize, got: usize },
    #[error("unknown context tag {0}")]
    UnknownContext(u8),
    #[error("flag byte at offset {offset} must be 0 or 1, got {value}")]
    InvalidFlag { offset: usize, value: u8 },
}
