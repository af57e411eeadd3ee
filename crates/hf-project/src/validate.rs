//! Project validation logic.

use crate::schema::{
    Autosizable, CurveDef, CurveFormDef, HumidifierDef, HumidifierKindDef, Project,
    ScheduleKindDef, SizingDef, SizingTargetDef,
};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: String, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Insert a name case-insensitively, failing on a repeat.
fn unique(
    seen: &mut HashSet<String>,
    name: &str,
    context: &str,
) -> Result<(), ValidationError> {
    if !seen.insert(name.trim().to_uppercase()) {
        return Err(ValidationError::DuplicateId {
            id: name.to_string(),
            context: context.to_string(),
        });
    }
    Ok(())
}

fn positive(v: f64, field: String) -> Result<(), ValidationError> {
    if !v.is_finite() || v <= 0.0 {
        return Err(invalid(field, v, "must be positive and finite"));
    }
    Ok(())
}

fn non_negative(v: f64, field: String) -> Result<(), ValidationError> {
    if !v.is_finite() || v < 0.0 {
        return Err(invalid(field, v, "must be non-negative and finite"));
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    positive(project.environment.baro_press_pa, "environment baro_press_pa".into())?;
    non_negative(project.environment.outdoor_hum_rat, "environment outdoor_hum_rat".into())?;
    positive(project.timestep.system_s, "timestep system_s".into())?;
    if project.run.hvac_iterations == 0 {
        return Err(invalid(
            "run hvac_iterations".into(),
            0,
            "at least one iteration per step",
        ));
    }

    let mut node_names = HashSet::new();
    for node in &project.nodes {
        if node.name.trim().is_empty() {
            return Err(invalid("node name".into(), "", "must not be blank"));
        }
        unique(&mut node_names, &node.name, "nodes")?;
        if let Some(m) = node.mass_flow_kgps {
            non_negative(m, format!("node '{}' mass_flow_kgps", node.name))?;
        }
        if let Some(w) = node.hum_rat {
            non_negative(w, format!("node '{}' hum_rat", node.name))?;
        }
    }

    let mut schedule_names = HashSet::new();
    for schedule in &project.schedules {
        unique(&mut schedule_names, &schedule.name, "schedules")?;
        let values: &[f64] = match &schedule.kind {
            ScheduleKindDef::Constant { value } => std::slice::from_ref(value),
            ScheduleKindDef::Hourly { values } => {
                if values.len() != 24 {
                    return Err(invalid(
                        format!("schedule '{}' values", schedule.name),
                        values.len(),
                        "hourly schedules need 24 values",
                    ));
                }
                values
            }
        };
        if let Some(v) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(invalid(
                format!("schedule '{}' value", schedule.name),
                v,
                "must lie in [0, 1]",
            ));
        }
    }

    let mut curve_names = HashSet::new();
    for curve in &project.curves {
        unique(&mut curve_names, &curve.name, "curves")?;
        validate_curve(curve)?;
    }

    let mut tank_names = HashSet::new();
    for tank in &project.water_tanks {
        unique(&mut tank_names, &tank.name, "water_tanks")?;
        positive(tank.capacity_m3, format!("water tank '{}' capacity_m3", tank.name))?;
        non_negative(
            tank.initial_volume_m3,
            format!("water tank '{}' initial_volume_m3", tank.name),
        )?;
        if tank.initial_volume_m3 > tank.capacity_m3 {
            return Err(invalid(
                format!("water tank '{}' initial_volume_m3", tank.name),
                tank.initial_volume_m3,
                "exceeds capacity",
            ));
        }
    }

    if let Some(sizing) = &project.sizing {
        validate_sizing(sizing)?;
    }

    let refs = References {
        schedules: &schedule_names,
        curves: &curve_names,
        tanks: &tank_names,
    };
    let mut humidifier_names = HashSet::new();
    for humidifier in &project.humidifiers {
        unique(&mut humidifier_names, &humidifier.name, "humidifiers")?;
        validate_humidifier(humidifier, &refs)?;
    }

    Ok(())
}

fn validate_curve(curve: &CurveDef) -> Result<(), ValidationError> {
    let coeffs: Vec<f64> = match &curve.form {
        CurveFormDef::Linear { c0, c1 } => vec![*c0, *c1],
        CurveFormDef::Quadratic { c0, c1, c2 } => vec![*c0, *c1, *c2],
        CurveFormDef::Cubic { c0, c1, c2, c3 } => vec![*c0, *c1, *c2, *c3],
        CurveFormDef::Biquadratic { c } => c.to_vec(),
    };
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(invalid(
            format!("curve '{}' coefficients", curve.name),
            "non-finite",
            "coefficients must be finite",
        ));
    }
    if let (Some(lo), Some(hi)) = (curve.min_x, curve.max_x)
        && lo > hi
    {
        return Err(invalid(
            format!("curve '{}' min_x", curve.name),
            lo,
            "exceeds max_x",
        ));
    }
    Ok(())
}

fn validate_sizing(sizing: &SizingDef) -> Result<(), ValidationError> {
    match &sizing.target {
        SizingTargetDef::None => {}
        SizingTargetDef::Zone { index } => {
            if *index >= sizing.zone.len() {
                return Err(ValidationError::MissingReference {
                    id: index.to_string(),
                    context: "sizing zone index".to_string(),
                });
            }
        }
        SizingTargetDef::AirLoop { system, .. } => {
            if *system >= sizing.system.len() {
                return Err(ValidationError::MissingReference {
                    id: system.to_string(),
                    context: "sizing air loop index".to_string(),
                });
            }
        }
    }
    if let Some(t) = sizing.autosize_threshold {
        non_negative(t, "sizing autosize_threshold".into())?;
    }
    Ok(())
}

struct References<'a> {
    schedules: &'a HashSet<String>,
    curves: &'a HashSet<String>,
    tanks: &'a HashSet<String>,
}

fn check_ref(
    set: &HashSet<String>,
    name: Option<&str>,
    context: String,
) -> Result<(), ValidationError> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) if !set.contains(&n.to_uppercase()) => Err(ValidationError::MissingReference {
            id: n.to_string(),
            context,
        }),
        _ => Ok(()),
    }
}

fn validate_humidifier(h: &HumidifierDef, refs: &References<'_>) -> Result<(), ValidationError> {
    if h.name.trim().is_empty() {
        return Err(invalid("humidifier name".into(), "", "must not be blank"));
    }
    for (field, node) in [
        ("air_inlet_node", &h.air_inlet_node),
        ("air_outlet_node", &h.air_outlet_node),
    ] {
        if node.trim().is_empty() {
            return Err(invalid(
                format!("humidifier '{}' {field}", h.name),
                "",
                "must not be blank",
            ));
        }
    }
    if h.air_inlet_node.trim().eq_ignore_ascii_case(h.air_outlet_node.trim()) {
        return Err(invalid(
            format!("humidifier '{}' air_outlet_node", h.name),
            &h.air_outlet_node,
            "inlet and outlet must differ",
        ));
    }

    for (field, v) in [
        ("nominal_capacity_m3ps", h.nominal_capacity_m3ps),
        ("rated_power_w", h.rated_power_w),
    ] {
        if let Autosizable::Value(v) = v {
            non_negative(v, format!("humidifier '{}' {field}", h.name))?;
        }
    }
    non_negative(h.fan_power_w, format!("humidifier '{}' fan_power_w", h.name))?;
    non_negative(h.standby_power_w, format!("humidifier '{}' standby_power_w", h.name))?;

    check_ref(
        refs.schedules,
        h.availability_schedule.as_deref(),
        format!("humidifier '{}' availability_schedule", h.name),
    )?;
    check_ref(
        refs.tanks,
        h.water_storage_tank.as_deref(),
        format!("humidifier '{}' water_storage_tank", h.name),
    )?;

    if let HumidifierKindDef::GasSteam {
        thermal_efficiency,
        efficiency_curve,
        ..
    } = &h.kind
    {
        if !thermal_efficiency.is_finite() || *thermal_efficiency <= 0.0 || *thermal_efficiency > 1.0 {
            return Err(invalid(
                format!("humidifier '{}' thermal_efficiency", h.name),
                thermal_efficiency,
                "must lie in (0, 1]",
            ));
        }
        check_ref(
            refs.curves,
            efficiency_curve.as_deref(),
            format!("humidifier '{}' efficiency_curve", h.name),
        )?;
    }
    Ok(())
}
