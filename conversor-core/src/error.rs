//! Typed conversion errors
//!
//! The engine never panics on bad input. Every failure is one of the kinds
//! below, and each kind carries a stable machine-readable code so a
//! presentation layer can choose its own wording.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::Category;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const UNIT_NOT_FOUND: &str = "UNIT_NOT_FOUND";
    pub const MISSING_SELECTION: &str = "MISSING_SELECTION";
    pub const SAME_UNIT_SELECTION: &str = "SAME_UNIT_SELECTION";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const INVALID_REGISTRY: &str = "INVALID_REGISTRY";
}

/// Errors raised while building a category registry from a unit table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("unit table is empty")]
    EmptyTable,

    #[error("unit '{unit}' has a zero scale")]
    DegenerateScale { unit: String },

    #[error("unit '{unit}' has a non-finite scale or offset")]
    NonFiniteFactor { unit: String },

    #[error("unit name '{unit}' is defined more than once")]
    DuplicateUnit { unit: String },

    #[error("no base unit (scale 1, offset 0) in table")]
    MissingBase,

    #[error("both '{first}' and '{second}' qualify as base unit")]
    MultipleBases { first: String, second: String },

    #[error("alias '{alias}' points to unknown unit '{target}'")]
    UnknownAliasTarget { alias: String, target: String },
}

/// Errors returned by a conversion request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("invalid number: '{input}'")]
    InvalidNumber { input: String },

    #[error("unknown {category} unit: '{name}'")]
    UnitNotFound { category: Category, name: String },

    #[error("no category selected")]
    MissingSelection,

    #[error("origin and destination are both '{unit}'")]
    SameUnitSelection { unit: String },

    #[error("unknown category: '{input}'")]
    UnknownCategory { input: String },

    #[error("invalid unit registry: {0}")]
    Registry(#[from] RegistryError),
}

impl ConversionError {
    pub fn unit_not_found(category: Category, name: impl Into<String>) -> Self {
        ConversionError::UnitNotFound { category, name: name.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::InvalidNumber { .. } => codes::INVALID_NUMBER,
            ConversionError::UnitNotFound { .. } => codes::UNIT_NOT_FOUND,
            ConversionError::MissingSelection => codes::MISSING_SELECTION,
            ConversionError::SameUnitSelection { .. } => codes::SAME_UNIT_SELECTION,
            ConversionError::UnknownCategory { .. } => codes::UNKNOWN_CATEGORY,
            ConversionError::Registry(_) => codes::INVALID_REGISTRY,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ConversionError::InvalidNumber { .. } => {
                Some("Enter a plain number such as 123 or -4.5".to_string())
            }
            ConversionError::UnitNotFound { category, .. } => {
                Some(format!("Use list_units('{}') to see valid unit names", category))
            }
            ConversionError::MissingSelection => {
                Some("Select length, mass, temperature or currency first".to_string())
            }
            ConversionError::SameUnitSelection { .. } => {
                Some("Pick a destination unit different from the origin".to_string())
            }
            ConversionError::UnknownCategory { .. } => {
                Some("Valid categories: length, mass, temperature, currency".to_string())
            }
            ConversionError::Registry(_) => None,
        }
    }
}

/// Serializable error payload for callers across a wire boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&ConversionError> for ErrorReport {
    fn from(err: &ConversionError) -> Self {
        ErrorReport {
            code: err.code().to_string(),
            message: err.to_string(),
            suggestion: err.suggestion(),
        }
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}
