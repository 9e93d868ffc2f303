use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GateError {
    #[error("risk coordinate {index} has negative weight {weight}")]
    NegativeWeight { index: usize, weight: f64 },
}
