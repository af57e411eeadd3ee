//! Fixed-cadence run driver.
//!
//! Each step sets the clock hour, calls every humidifier for the configured
//! number of HVAC iterations, then draws water from the tanks. Boundary node
//! states stay as the project gives them.

use hf_components::{Humidifier, HumidifierKind};
use hf_core::EquipId;
use hf_core::units::constants::SEC_IN_HOUR;
use hf_project::schema::Project;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::runtime_compile::{HumidifierRuntime, compile_project};

/// Options overriding the project's run section.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub steps: Option<usize>,
}

/// State of one humidifier at the end of a step.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HumidifierStep {
    pub name: String,
    pub outlet_temp_c: f64,
    pub outlet_hum_rat: f64,
    pub outlet_mass_flow_kgps: f64,
    pub water_add_kgps: f64,
    pub water_cons_rate_m3ps: f64,
    pub water_cons_m3: f64,
    pub tank_supply_m3: f64,
    pub starved_supply_m3: f64,
    pub electric_power_w: f64,
    pub electric_energy_j: f64,
    pub gas_power_w: f64,
    pub gas_energy_j: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermal_eff: Option<f64>,
}

impl HumidifierStep {
    fn capture(unit: &Humidifier) -> Self {
        Self {
            name: unit.name.clone(),
            outlet_temp_c: unit.outlet.temp,
            outlet_hum_rat: unit.outlet.hum_rat,
            outlet_mass_flow_kgps: unit.outlet.mass_flow_rate,
            water_add_kgps: unit.water_add,
            water_cons_rate_m3ps: unit.water.cons_rate,
            water_cons_m3: unit.water.cons,
            tank_supply_m3: unit.water.tank_supply_vol,
            starved_supply_m3: unit.water.starved_supply_vol,
            electric_power_w: unit.electric_power(),
            electric_energy_j: unit.electric_energy(),
            gas_power_w: unit.gas_power(),
            gas_energy_j: unit.gas_energy(),
            thermal_eff: match &unit.kind {
                HumidifierKind::GasSteam(g) => Some(g.thermal_eff),
                HumidifierKind::ElectricSteam(_) => None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub time_s: f64,
    pub hour: usize,
    pub humidifiers: Vec<HumidifierStep>,
}

/// Quantities integrated over the run for one humidifier.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HumidifierTotals {
    pub name: String,
    pub water_m3: f64,
    pub starved_water_m3: f64,
    pub electric_energy_j: f64,
    pub gas_energy_j: f64,
    pub hours_on: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub time_step_s: f64,
    pub totals: Vec<HumidifierTotals>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub records: Vec<StepRecord>,
    pub summary: RunSummary,
    /// Rendered diagnostics in the order they were raised.
    pub diagnostics: Vec<String>,
}

impl HumidifierStep {
    /// Names accepted by [`HumidifierStep::value`].
    pub const VARIABLES: [&'static str; 13] = [
        "outlet_temp_c",
        "outlet_hum_rat",
        "outlet_mass_flow_kgps",
        "water_add_kgps",
        "water_cons_rate_m3ps",
        "water_cons_m3",
        "tank_supply_m3",
        "starved_supply_m3",
        "electric_power_w",
        "electric_energy_j",
        "gas_power_w",
        "gas_energy_j",
        "thermal_eff",
    ];

    pub fn value(&self, variable: &str) -> Option<f64> {
        Some(match variable {
            "outlet_temp_c" => self.outlet_temp_c,
            "outlet_hum_rat" => self.outlet_hum_rat,
            "outlet_mass_flow_kgps" => self.outlet_mass_flow_kgps,
            "water_add_kgps" => self.water_add_kgps,
            "water_cons_rate_m3ps" => self.water_cons_rate_m3ps,
            "water_cons_m3" => self.water_cons_m3,
            "tank_supply_m3" => self.tank_supply_m3,
            "starved_supply_m3" => self.starved_supply_m3,
            "electric_power_w" => self.electric_power_w,
            "electric_energy_j" => self.electric_energy_j,
            "gas_power_w" => self.gas_power_w,
            "gas_energy_j" => self.gas_energy_j,
            "thermal_eff" => self.thermal_eff?,
            _ => return None,
        })
    }
}

impl RunResponse {
    /// Time series `(time_s, value)` of one humidifier variable.
    pub fn series(&self, humidifier: &str, variable: &str) -> AppResult<Vec<(f64, f64)>> {
        if !HumidifierStep::VARIABLES.contains(&variable) {
            return Err(AppError::UnknownVariable(variable.to_string()));
        }
        self.records
            .iter()
            .map(|record| {
                let unit = record
                    .humidifiers
                    .iter()
                    .find(|h| h.name == humidifier)
                    .ok_or_else(|| AppError::HumidifierNotFound(humidifier.to_string()))?;
                let value = unit
                    .value(variable)
                    .ok_or_else(|| AppError::UnknownVariable(variable.to_string()))?;
                Ok((record.time_s, value))
            })
            .collect()
    }
}

/// Compile and run a project.
pub fn run_project(project: &Project, options: &RunOptions) -> AppResult<RunResponse> {
    let mut rt = compile_project(project)?;
    let steps = options.steps.unwrap_or(project.run.steps);
    run_runtime(
        &mut rt,
        steps,
        project.run.start_hour,
        project.run.hvac_iterations,
    )
}

/// Step an already compiled runtime.
pub fn run_runtime(
    rt: &mut HumidifierRuntime,
    steps: usize,
    start_hour: usize,
    hvac_iterations: usize,
) -> AppResult<RunResponse> {
    if hvac_iterations == 0 {
        return Err(AppError::Simulation(
            "at least one HVAC iteration per step is required".to_string(),
        ));
    }
    let dt = rt.sim.ctx.time_step_seconds();
    let mut handles: Vec<Option<EquipId>> = vec![None; rt.names.len()];
    let mut records = Vec::with_capacity(steps);
    let mut totals: Vec<HumidifierTotals> = rt
        .names
        .iter()
        .map(|name| HumidifierTotals {
            name: name.clone(),
            ..Default::default()
        })
        .collect();

    for step in 0..steps {
        let time_s = step as f64 * dt;
        let hour = (start_hour + (time_s / SEC_IN_HOUR) as usize) % 24;
        rt.sim.schedules.set_hour(hour);
        rt.sim.ctx.flags.begin_environment = step == 0;

        for iteration in 0..hvac_iterations {
            rt.sim.ctx.flags.begin_time_step = iteration == 0;
            for (name, handle) in rt.names.iter().zip(handles.iter_mut()) {
                rt.manager
                    .simulate(&mut rt.sim, name, iteration == 0, handle)?;
            }
        }
        rt.sim.tanks.update(dt);

        let mut humidifiers = Vec::with_capacity(rt.names.len());
        for (handle, total) in handles.iter().zip(totals.iter_mut()) {
            let unit = handle
                .and_then(|id| rt.manager.unit(id))
                .ok_or_else(|| AppError::HumidifierNotFound(total.name.clone()))?;
            let snap = HumidifierStep::capture(unit);
            total.water_m3 += snap.water_cons_m3;
            total.starved_water_m3 += snap.starved_supply_m3;
            total.electric_energy_j += snap.electric_energy_j;
            total.gas_energy_j += snap.gas_energy_j;
            if snap.water_add_kgps > 0.0 {
                total.hours_on += dt / SEC_IN_HOUR;
            }
            humidifiers.push(snap);
        }
        tracing::debug!(step, hour, "step complete");
        records.push(StepRecord {
            step,
            time_s,
            hour,
            humidifiers,
        });
    }

    Ok(RunResponse {
        records,
        summary: RunSummary {
            steps,
            time_step_s: dt,
            totals,
        },
        diagnostics: rt
            .sim
            .diagnostics
            .records()
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}
