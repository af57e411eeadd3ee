//! Error types for schedule and curve lookups.

use hf_core::HfError;
use thiserror::Error;

/// Result type for schedule and curve operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in schedule and curve operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Name or id does not resolve.
    #[error("Invalid reference: {what}")]
    InvalidReference { what: String },

    /// A name was registered twice.
    #[error("Duplicate name: {name}")]
    Duplicate { name: String },

    /// Curve has the wrong number of independent variables.
    #[error("Curve \"{curve}\" has {actual} independent variable(s), expected one of {expected:?}")]
    CurveDimensions {
        curve: String,
        expected: Vec<usize>,
        actual: usize,
    },
}

impl From<ControlError> for HfError {
    fn from(err: ControlError) -> Self {
        let what = err.to_string();
        match err {
            ControlError::InvalidArg { .. } => HfError::Invariant { what },
            // Bad names and curve shapes come from model input.
            ControlError::InvalidReference { .. }
            | ControlError::Duplicate { .. }
            | ControlError::CurveDimensions { .. } => HfError::Configuration { what },
        }
    }
}
