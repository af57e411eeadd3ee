//! Fluid property errors.

use hf_core::HfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, NaN from a backend, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of valid range.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Backend error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<FluidError> for HfError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => HfError::Invariant {
                what: format!("Non-physical fluid value: {what}"),
            },
            FluidError::OutOfRange { what, value } => HfError::Invariant {
                what: format!("Fluid value out of range: {what} = {value}"),
            },
            FluidError::Backend { message } => HfError::Invariant {
                what: format!("Fluid backend error: {message}"),
            },
        }
    }
}
