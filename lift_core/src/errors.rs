//! # Error Types
//!
//! Structured error types for lift_core. The estimator itself never fails;
//! these errors come from the Input Collector rules (validation and text
//! parsing) and from loading the secrets file.
//!
//! ## Example
//!
//! ```rust
//! use lift_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_ft: f64) -> CalcResult<()> {
//!     if width_ft <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "width_ft".to_string(),
//!             value: width_ft.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for lift_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimation and configuration.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (below its minimum, not a number, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The secrets/configuration file could not be read or parsed
    #[error("Configuration error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// Output could not be serialized
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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Field name for input-related errors, used by front ends to highlight a widget
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("width_ft", "-5", "Width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("user").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::config_error("secrets.toml", "bad").error_code(), "CONFIG_ERROR");
        let serialization = CalcError::SerializationError { reason: "key must be a string".to_string() };
        assert_eq!(serialization.error_code(), "SERIALIZATION_ERROR");
        assert_eq!(serialization.field(), None);
    }

    #[test]
    fn test_field_accessor() {
        let err = CalcError::invalid_input("price_per_lb", "0", "too small");
        assert_eq!(err.field(), Some("price_per_lb"));
        assert_eq!(CalcError::config_error("a", "b").field(), None);
    }
}
