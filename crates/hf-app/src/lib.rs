//! Application service layer for hvacflow.
//!
//! Shared by the CLI: project loading and validation, compilation into a
//! runnable simulation, and the fixed-cadence run driver.

pub mod error;
pub mod project_service;
pub mod run_service;
pub mod runtime_compile;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use project_service::{HumidifierSummary, list_humidifiers, load_project, validate_project};
pub use run_service::{
    HumidifierStep, HumidifierTotals, RunOptions, RunResponse, RunSummary, StepRecord,
    run_project, run_runtime,
};
pub use runtime_compile::{HumidifierRuntime, compile_project, humidifier_object, lookup_nodes};
