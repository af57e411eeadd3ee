//! Error types for the simulation context.

use thiserror::Error;

/// Errors raised by simulation-context services.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid reference: {what}")]
    InvalidReference { what: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<hf_graph::GraphError> for SimError {
    fn from(e: hf_graph::GraphError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<hf_fluids::FluidError> for SimError {
    fn from(e: hf_fluids::FluidError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<hf_controls::ControlError> for SimError {
    fn from(e: hf_controls::ControlError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
