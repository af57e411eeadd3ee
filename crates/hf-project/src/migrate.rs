//! Upgrades older model files to the current schema.

use crate::ProjectError;
use crate::schema::{HumidifierKindDef, Project};

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = match project.version {
            0 => v0_to_v1(project),
            1 => v1_to_v2(project),
            v => {
                return Err(ProjectError::Migration {
                    what: format!("No migration path from version {v}"),
                });
            }
        };
    }
    Ok(project)
}

/// Version 0 files had no setpoint-test switch; keep them running without it.
fn v0_to_v1(mut project: Project) -> Project {
    project.run.do_setpoint_test = false;
    project.version = 1;
    project
}

/// Version 1 accepted `Fixed` / `Variable` as inlet-water options.
fn v1_to_v2(mut project: Project) -> Project {
    for unit in &mut project.humidifiers {
        if let HumidifierKindDef::GasSteam {
            inlet_water_temperature_option: Some(option),
            ..
        } = &mut unit.kind
        {
            let expanded = match option.trim().to_ascii_lowercase().as_str() {
                "fixed" => Some("FixedInletWaterTemperature"),
                "variable" => Some("VariableInletWaterTemperature"),
                _ => None,
            };
            if let Some(keyword) = expanded {
                *option = keyword.to_string();
            }
        }
    }
    project.version = 2;
    project
}
