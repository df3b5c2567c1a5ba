//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Input width does not match what a fitted step was trained on
    #[error("Shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Row counts of two aligned inputs differ
    #[error("Row count mismatch: {features} feature rows, {targets} targets")]
    RowCountMismatch { features: usize, targets: usize },

    /// Nothing to fit on
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Category not seen at fit time, under the error policy
    #[error("Unknown category '{value}' in column {column}")]
    UnknownCategory { column: usize, value: String },

    /// Invalid solver or transformer parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// NaN or infinite value in numeric input
    #[error("Non-finite value at row {row}, column {column}")]
    NonFiniteValue { row: usize, column: usize },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
