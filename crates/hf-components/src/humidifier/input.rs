//! Loading humidifier objects from model input.
//!
//! Errors are collected as severe diagnostics while every object is
//! processed; the load fails once at the end.

use std::collections::HashSet;

use hf_graph::ConnectionKind;
use hf_sim::SimState;

use super::model::{
    ELECTRIC_STEAM_TYPE, ElectricSteam, GAS_STEAM_TYPE, GasSteam, Humidifier, HumidifierKind,
    InletWaterTemp, TankLink,
};
use crate::error::{ComponentError, ComponentResult};

const ROUTINE: &str = "GetHumidifierInputs: ";
const SCHEDULE_FIELD: &str = "Availability Schedule Name";
const CURVE_FIELD: &str = "Thermal Efficiency Rating Modifier Curve Name";

/// Fields present only on gas-fired units.
#[derive(Debug, Clone, PartialEq)]
pub enum HumidifierInputKind {
    ElectricSteam,
    GasSteam {
        /// Rated thermal efficiency; replaced by the backed-out value when
        /// the rated gas use rate is hard-sized.
        thermal_efficiency: f64,
        efficiency_curve: Option<String>,
        inlet_water_temperature_option: Option<String>,
    },
}

/// One humidifier object as it appears in model input.
#[derive(Debug, Clone, PartialEq)]
pub struct HumidifierObject {
    pub name: String,
    pub kind: HumidifierInputKind,
    /// Blank means always available.
    pub availability_schedule: Option<String>,
    /// [m3/s] or the autosize sentinel.
    pub nominal_capacity_volume: f64,
    /// Rated power [W] (rated gas use rate for gas units) or the autosize sentinel.
    pub rated_power: f64,
    pub fan_power: f64,
    pub standby_power: f64,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
    /// Blank means water from mains.
    pub water_storage_tank: Option<String>,
}

impl HumidifierObject {
    pub fn electric(name: impl Into<String>, inlet: &str, outlet: &str) -> Self {
        Self {
            name: name.into(),
            kind: HumidifierInputKind::ElectricSteam,
            availability_schedule: None,
            nominal_capacity_volume: 0.0,
            rated_power: 0.0,
            fan_power: 0.0,
            standby_power: 0.0,
            air_inlet_node: inlet.to_string(),
            air_outlet_node: outlet.to_string(),
            water_storage_tank: None,
        }
    }

    pub fn gas(name: impl Into<String>, inlet: &str, outlet: &str, thermal_efficiency: f64) -> Self {
        Self {
            kind: HumidifierInputKind::GasSteam {
                thermal_efficiency,
                efficiency_curve: None,
                inlet_water_temperature_option: None,
            },
            ..Self::electric(name, inlet, outlet)
        }
    }

    pub fn with_schedule(mut self, schedule: &str) -> Self {
        self.availability_schedule = Some(schedule.to_string());
        self
    }

    pub fn with_capacity(mut self, nominal_capacity_volume: f64) -> Self {
        self.nominal_capacity_volume = nominal_capacity_volume;
        self
    }

    pub fn with_power(mut self, rated: f64, fan: f64, standby: f64) -> Self {
        self.rated_power = rated;
        self.fan_power = fan;
        self.standby_power = standby;
        self
    }

    pub fn with_water_tank(mut self, tank: &str) -> Self {
        self.water_storage_tank = Some(tank.to_string());
        self
    }

    fn object_type(&self) -> &'static str {
        match self.kind {
            HumidifierInputKind::ElectricSteam => ELECTRIC_STEAM_TYPE,
            HumidifierInputKind::GasSteam { .. } => GAS_STEAM_TYPE,
        }
    }
}

/// Source of humidifier objects.
pub trait HumidifierInput {
    fn humidifier_objects(&self) -> Vec<HumidifierObject>;
}

impl HumidifierInput for Vec<HumidifierObject> {
    fn humidifier_objects(&self) -> Vec<HumidifierObject> {
        self.clone()
    }
}

impl HumidifierInput for [HumidifierObject] {
    fn humidifier_objects(&self) -> Vec<HumidifierObject> {
        self.to_vec()
    }
}

fn blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build every humidifier from `source`, electric units first.
///
/// Nodes, component sets, tank slots and report variables are registered in
/// `sim` as a side effect.
pub fn load_humidifiers(
    source: &dyn HumidifierInput,
    sim: &mut SimState,
) -> ComponentResult<Vec<Humidifier>> {
    let mut objects = source.humidifier_objects();
    // Stable: keeps input order within each kind.
    objects.sort_by_key(|o| matches!(o.kind, HumidifierInputKind::GasSteam { .. }));

    let mut errors = 0usize;
    let mut unique = HashSet::new();
    let mut units = Vec::with_capacity(objects.len());

    for obj in &objects {
        let before = errors;
        let built = load_one(obj, sim, &mut unique, &mut errors);
        if let Some(unit) = built.filter(|_| errors == before) {
            units.push(unit);
        }
    }

    if errors > 0 {
        sim.diagnostics
            .fatal(format!("{ROUTINE}Errors found in input."));
        return Err(ComponentError::InputErrors { count: errors });
    }

    for unit in &mut units {
        unit.setup_report_variables(&mut sim.outputs);
    }
    tracing::info!(count = units.len(), "humidifiers loaded");
    Ok(units)
}

fn load_one(
    obj: &HumidifierObject,
    sim: &mut SimState,
    unique: &mut HashSet<String>,
    errors: &mut usize,
) -> Option<Humidifier> {
    let object_type = obj.object_type();
    let name = obj.name.as_str();

    if !unique.insert(name.trim().to_uppercase()) {
        sim.diagnostics
            .severe(format!("{ROUTINE}{object_type}=\"{name}\", Duplicate Name entered."))
            .cont(format!("Name=\"{name}\" is already used by another humidifier."));
        *errors += 1;
    }

    let schedule = match sim.schedules.resolve(blank(&obj.availability_schedule)) {
        Ok(s) => Some(s),
        Err(_) => {
            sim.diagnostics.severe(format!(
                "{ROUTINE}{object_type}: invalid {SCHEDULE_FIELD} entered ={} for Name={name}",
                obj.availability_schedule.as_deref().unwrap_or_default()
            ));
            *errors += 1;
            None
        }
    };

    let mut node = |sim: &mut SimState, node_name: &str, kind: ConnectionKind| {
        match sim.nodes.get_only_single_node(node_name, object_type, name, kind) {
            Ok(id) => Some(id),
            Err(e) => {
                sim.diagnostics.severe(format!("{ROUTINE}{e}"));
                *errors += 1;
                None
            }
        }
    };
    let inlet = node(sim, &obj.air_inlet_node, ConnectionKind::Inlet);
    let outlet = node(sim, &obj.air_outlet_node, ConnectionKind::Outlet);

    if let Err(e) = sim.nodes.test_comp_set(
        object_type,
        name,
        &obj.air_inlet_node,
        &obj.air_outlet_node,
        "Air Nodes",
    ) {
        sim.diagnostics.severe(format!("{ROUTINE}{e}"));
        *errors += 1;
    }

    let mut tank_supply_slot = None;
    let mut water_tank = None;
    if let Some(tank_name) = blank(&obj.water_storage_tank) {
        match sim.tanks.setup_demand_component(tank_name, object_type, name) {
            Ok((tank, demand_slot)) => water_tank = Some(TankLink { tank, demand_slot }),
            Err(e) => {
                sim.diagnostics
                    .severe(format!("{ROUTINE}{object_type}=\"{name}\", {e}"));
                *errors += 1;
            }
        }
        if matches!(obj.kind, HumidifierInputKind::GasSteam { .. }) && water_tank.is_some() {
            match sim.tanks.setup_supply_component(tank_name, object_type, name) {
                Ok((_, slot)) => tank_supply_slot = Some(slot),
                Err(e) => {
                    sim.diagnostics
                        .severe(format!("{ROUTINE}{object_type}=\"{name}\", {e}"));
                    *errors += 1;
                }
            }
        }
    }

    let kind = match &obj.kind {
        HumidifierInputKind::ElectricSteam => HumidifierKind::ElectricSteam(ElectricSteam::default()),
        HumidifierInputKind::GasSteam {
            thermal_efficiency,
            efficiency_curve,
            inlet_water_temperature_option,
        } => {
            let curve = blank(efficiency_curve).and_then(|curve_name| {
                match sim.curves.find(curve_name) {
                    Some(id) => match sim.curves.check_curve_dims(id, &[1]) {
                        Ok(()) => Some(id),
                        Err(e) => {
                            sim.diagnostics
                                .severe(format!("{ROUTINE}{object_type}=\"{name}\"."))
                                .cont(format!("...Invalid {CURVE_FIELD}: {e}"));
                            *errors += 1;
                            None
                        }
                    },
                    None => {
                        sim.diagnostics
                            .severe(format!("{ROUTINE}{object_type}=\"{name}\","))
                            .cont(format!("Invalid {CURVE_FIELD}={curve_name}"));
                        sim.diagnostics.severe(format!("...{CURVE_FIELD} not found."));
                        *errors += 1;
                        None
                    }
                }
            });
            HumidifierKind::GasSteam(GasSteam {
                thermal_eff_rated: *thermal_efficiency,
                efficiency_curve: curve,
                inlet_water_temp: InletWaterTemp::from_keyword(
                    blank(inlet_water_temperature_option),
                ),
                tank_supply_slot,
                ..Default::default()
            })
        }
    };

    let mut unit = Humidifier::new(name, kind, inlet?, outlet?)
        .with_schedule(schedule?)
        .with_capacity(obj.nominal_capacity_volume)
        .with_power(obj.rated_power, obj.fan_power, obj.standby_power);
    if let Some(link) = water_tank {
        unit = unit.with_water_tank(link);
    }
    Some(unit)
}
