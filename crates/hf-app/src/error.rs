//! Error types for the hf-app service layer.

use std::path::PathBuf;

use hf_components::ComponentError;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Humidifier not found: {0}")]
    HumidifierNotFound(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    /// A humidifier call aborted the run.
    #[error("Simulation aborted: {source}")]
    Component {
        #[from]
        source: ComponentError,
    },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hf_project::ProjectError> for AppError {
    fn from(err: hf_project::ProjectError) -> Self {
        match err {
            hf_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<hf_sim::SimError> for AppError {
    fn from(err: hf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<hf_controls::ControlError> for AppError {
    fn from(err: hf_controls::ControlError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<hf_graph::GraphError> for AppError {
    fn from(err: hf_graph::GraphError) -> Self {
        AppError::Compile(err.to_string())
    }
}
