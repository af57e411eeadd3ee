//! hf-project: model file format and validation.
//!
//! A project is one YAML (or JSON) document describing the environment, the
//! air nodes, schedules, curves, tanks and humidifiers of a model. Every
//! loader migrates older versions and validates before returning.

pub mod migrate;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn checked(project: Project) -> ProjectResult<Project> {
    let project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}

/// Parse a YAML model from text, migrate and validate it.
pub fn from_yaml_str(content: &str) -> ProjectResult<Project> {
    checked(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> ProjectResult<Project> {
    checked(serde_json::from_str(content)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    from_yaml_str(&std::fs::read_to_string(path)?)
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    from_json_str(&std::fs::read_to_string(path)?)
}

/// Validate, then write as YAML.
pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, serde_yaml::to_string(project)?)?;
    Ok(())
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, serde_json::to_string_pretty(project)?)?;
    Ok(())
}

/// Load by file extension: `.json` as JSON, anything else as YAML.
pub fn load_project(path: &Path) -> ProjectResult<Project> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
