//! Project loading, validation, and introspection.

use std::path::Path;

use hf_project::schema::{HumidifierKindDef, Project};

use crate::error::{AppError, AppResult};

/// Summary of a humidifier for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct HumidifierSummary {
    pub name: String,
    pub kind: &'static str,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
    pub tank_fed: bool,
}

/// Load a project from YAML or JSON, chosen by extension.
pub fn load_project(path: &Path) -> AppResult<Project> {
    if !path.exists() {
        return Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(hf_project::load_project(path)?)
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    hf_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))
}

pub fn list_humidifiers(project: &Project) -> Vec<HumidifierSummary> {
    project
        .humidifiers
        .iter()
        .map(|h| HumidifierSummary {
            name: h.name.clone(),
            kind: match h.kind {
                HumidifierKindDef::ElectricSteam => "ElectricSteam",
                HumidifierKindDef::GasSteam { .. } => "GasSteam",
            },
            air_inlet_node: h.air_inlet_node.clone(),
            air_outlet_node: h.air_outlet_node.clone(),
            tank_fed: h.water_storage_tank.is_some(),
        })
        .collect()
}
