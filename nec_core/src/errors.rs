//! # Error Types
//!
//! Structured error types for nec_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Code violations (overfill, no conforming size, excessive voltage drop) are
//! NOT errors. They are reported as [`crate::compliance::Violation`] tags on a
//! successfully computed result. `CalcError` is reserved for inputs that are
//! present but structurally unusable.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::errors::{CalcError, CalcResult};
//!
//! fn validate_current(load_amps: f64) -> CalcResult<()> {
//!     if load_amps < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "load_amps".to_string(),
//!             value: load_amps.to_string(),
//!             reason: "Current cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for nec_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A table key could not be resolved where a value is mandatory
    #[error("No entry in {table} for {key}")]
    UnknownTableKey { table: String, key: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownTableKey error
    pub fn unknown_table_key(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::UnknownTableKey {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownTableKey { .. } => "UNKNOWN_TABLE_KEY",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject values that are negative or not finite.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

/// Reject values that are zero, negative, or not finite.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}
