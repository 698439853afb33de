//! # Error Types
//!
//! Structured error types for pile_core. Every failure aborts the whole
//! calculation; no partial result table is ever returned alongside an error.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter_m: f64) -> CalcResult<()> {
//!     if diameter_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "diameter_m",
//!             diameter_m.to_string(),
//!             "Pile diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_diameter(-0.5).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pile_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for capacity calculations and their inputs.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Soil type text is neither "cohesionless" nor "cohesive".
    ///
    /// `layer` is the 1-based row number when the row is known.
    #[error("Invalid soil type. Please enter 'Cohesionless' or 'Cohesive'.")]
    InvalidSoilType { value: String, layer: Option<usize> },

    /// An input value is invalid (out of range, not a number, out of order)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Reading a profile file failed
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidSoilType error for a value outside any layer context
    pub fn invalid_soil_type(value: impl Into<String>) -> Self {
        CalcError::InvalidSoilType {
            value: value.into(),
            layer: None,
        }
    }

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

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Attach a 1-based layer number to an InvalidSoilType error.
    ///
    /// Other variants pass through untouched.
    pub fn at_layer(self, layer: usize) -> Self {
        match self {
            CalcError::InvalidSoilType { value, .. } => CalcError::InvalidSoilType {
                value,
                layer: Some(layer),
            },
            other => other,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidSoilType { .. } => "INVALID_SOIL_TYPE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("diameter_m", "-0.5", "Pile diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_soil_type_message() {
        let error = CalcError::invalid_soil_type("Silty");
        assert_eq!(
            error.to_string(),
            "Invalid soil type. Please enter 'Cohesionless' or 'Cohesive'."
        );
    }

    #[test]
    fn test_at_layer() {
        let error = CalcError::invalid_soil_type("Peat").at_layer(3);
        assert_eq!(
            error,
            CalcError::InvalidSoilType {
                value: "Peat".to_string(),
                layer: Some(3),
            }
        );

        let other = CalcError::missing_field("layers").at_layer(3);
        assert_eq!(other, CalcError::missing_field("layers"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_soil_type("x").error_code(), "INVALID_SOIL_TYPE");
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }
}
