//! Error types for the tollgrid transformation library.
//!
//! Two layers of errors:
//!
//! - [`CsvError`] - CSV parsing errors
//! - [`TransformError`] - malformed input tables seen by the transforms
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    Parse(String),

    /// Empty input.
    #[error("CSV input is empty")]
    EmptyInput,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::Parse(err.to_string())
    }
}

// =============================================================================
// Transform Errors
// =============================================================================

/// Errors raised when an input table does not match a transform's contract.
///
/// [`MissingColumn`](TransformError::MissingColumn),
/// [`TypeMismatch`](TransformError::TypeMismatch) and
/// [`InvalidValue`](TransformError::InvalidValue) form the invalid-input
/// family; [`DivisionByZero`](TransformError::DivisionByZero) is raised by
/// average-based transforms whose reference subset is empty.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is absent from the input rows.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column holds a value of the wrong type.
    #[error("Column '{column}': expected {expected}, got '{value}'")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        value: String,
    },

    /// A column holds a value of the right type but outside the accepted domain.
    #[error("Invalid value in column '{column}': {message}")]
    InvalidValue { column: String, message: String },

    /// No rows matched the reference ID, so no average can be formed.
    #[error("Division by zero: no edges start at reference id {reference_id}")]
    DivisionByZero { reference_id: i64 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;
