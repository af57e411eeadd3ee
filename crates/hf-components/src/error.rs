//! Error types for equipment models.

use hf_controls::ControlError;
use hf_core::error::HfError;
use hf_fluids::FluidError;
use hf_graph::GraphError;
use hf_sim::SimError;
use thiserror::Error;

/// Broad class of a component error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The model input cannot be run as given.
    Configuration,
    /// Internal state is inconsistent.
    Invariant,
}

/// Errors that abort a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("SimHumidifier: Unit not found={name}")]
    UnitNotFound { name: String },

    #[error("{}", invalid_index_message(.index, .count, .name, .stored))]
    InvalidIndex {
        index: u32,
        count: usize,
        name: String,
        stored: Option<String>,
    },

    #[error("GetHumidifierInputs: Errors found in input. ({count} severe)")]
    InputErrors { count: usize },

    #[error("{routine}: for {object_type}=\"{name}\" autosizing requires a {run} sizing run")]
    SizingRunRequired {
        routine: &'static str,
        object_type: &'static str,
        name: String,
        run: &'static str,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

fn invalid_index_message(index: &u32, count: &usize, name: &str, stored: &Option<String>) -> String {
    match stored {
        None => format!(
            "SimHumidifier: Invalid CompIndex passed={index}, Number of Units={count}, Entered Unit name={name}"
        ),
        Some(stored) => format!(
            "SimHumidifier: Invalid CompIndex passed={index}, Unit name={name}, stored Unit Name for that index={stored}"
        ),
    }
}

impl ComponentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComponentError::UnitNotFound { .. }
            | ComponentError::InvalidIndex { .. }
            | ComponentError::InputErrors { .. }
            | ComponentError::SizingRunRequired { .. } => ErrorKind::Configuration,
            ComponentError::Invariant { .. } => ErrorKind::Invariant,
        }
    }
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<FluidError> for ComponentError {
    fn from(e: FluidError) -> Self {
        ComponentError::Invariant {
            what: format!("Fluid property error: {e}"),
        }
    }
}

impl From<GraphError> for ComponentError {
    fn from(e: GraphError) -> Self {
        ComponentError::Invariant {
            what: e.to_string(),
        }
    }
}

impl From<SimError> for ComponentError {
    fn from(e: SimError) -> Self {
        ComponentError::Invariant {
            what: e.to_string(),
        }
    }
}

impl From<ControlError> for ComponentError {
    fn from(e: ControlError) -> Self {
        ComponentError::Invariant {
            what: e.to_string(),
        }
    }
}

impl From<ComponentError> for HfError {
    fn from(e: ComponentError) -> Self {
        let what = e.to_string();
        match e.kind() {
            ErrorKind::Configuration => HfError::Configuration { what },
            ErrorKind::Invariant => HfError::Invariant { what },
        }
    }
}
