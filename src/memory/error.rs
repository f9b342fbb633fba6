//! Validation errors raised by the memory bank.

use thiserror::Error;

/// Result type for memory operations
pub type MemoryResult<T> = Result<T, ValidationError>;

/// Invalid input to a memory operation.
///
/// Every variant is raised before any mutation happens, so a failed call
/// leaves the bank untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Expected vector of {expected} weights, received {got} weights instead: {weights:?}")]
    WeightLength {
        expected: usize,
        got: usize,
        weights: Vec<f64>,
    },

    #[error("Expected weights to sum to {expected}, instead got {actual}")]
    WeightSum { expected: f64, actual: f64 },

    #[error("Expected {name} vector of length {expected}, received length {got} instead: {vector:?}")]
    VectorLength {
        name: &'static str,
        expected: usize,
        got: usize,
        vector: Vec<f64>,
    },

    #[error("Expected {name} elements to be in [-1, 1], instead got {vector:?}")]
    VectorOutOfRange {
        name: &'static str,
        vector: Vec<f64>,
    },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Key vector has zero norm, cosine similarity is undefined")]
    ZeroKey,
}
