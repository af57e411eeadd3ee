//! Compilation of a project into simulation state and a humidifier manager.

use hf_components::{HumidifierInputKind, HumidifierManager, HumidifierObject};
use hf_controls::{Curve, CurveForm, ScheduleKind};
use hf_core::units::{degc, pa, s};
use hf_project::schema::{
    CurveDef, CurveFormDef, DuctDef, HumidifierDef, HumidifierKindDef, NodeDef, Project,
    ScheduleKindDef, SizingDef, SizingTargetDef,
};
use hf_sim::{
    AUTOSIZE, DuctType, Environment, SimContext, SimFlags, SimState, SizingState, SizingTarget,
    SystemSizingData, ZoneSizingData,
};

use crate::error::{AppError, AppResult};

/// Everything needed to step a project.
#[derive(Debug)]
pub struct HumidifierRuntime {
    pub sim: SimState,
    pub manager: HumidifierManager,
    /// Humidifier names in project order.
    pub names: Vec<String>,
}

/// Build the simulation state, load every humidifier and prime the tanks.
///
/// Input errors found while loading humidifiers are returned here rather than
/// on the first step.
pub fn compile_project(project: &Project) -> AppResult<HumidifierRuntime> {
    let mut sim = SimState::new().with_context(build_context(project));

    for node in &project.nodes {
        apply_node(&mut sim, node)?;
    }
    for schedule in &project.schedules {
        let kind = match &schedule.kind {
            ScheduleKindDef::Constant { value } => ScheduleKind::Constant { value: *value },
            ScheduleKindDef::Hourly { values } => ScheduleKind::Hourly {
                values: values.clone(),
            },
        };
        sim.schedules.add(schedule.name.clone(), kind)?;
    }
    sim.schedules.set_hour(project.run.start_hour);
    for curve in &project.curves {
        sim.curves.add(build_curve(curve))?;
    }
    for tank in &project.water_tanks {
        sim.tanks.add_tank(
            tank.name.clone(),
            tank.capacity_m3,
            tank.initial_volume_m3,
            tank.water_temp_c,
        )?;
    }
    if let Some(sizing) = &project.sizing {
        sim.sizing = build_sizing(sizing);
    }

    let objects: Vec<HumidifierObject> = project.humidifiers.iter().map(humidifier_object).collect();
    let mut manager = HumidifierManager::new(objects);
    manager.get_input(&mut sim)?;

    // Nodes flagged for EMS exist only after humidifiers registered theirs.
    for node in project.nodes.iter().filter(|n| n.ems_setpoint) {
        if let Some(id) = sim.nodes.find_node(&node.name) {
            sim.ctx.set_ems_hum_rat_min_actuator(id);
        }
    }

    let dt = sim.ctx.time_step_seconds();
    sim.tanks.initialize_availability(dt);
    tracing::info!(
        humidifiers = manager.units().len(),
        nodes = sim.nodes.len(),
        tanks = sim.tanks.len(),
        "project compiled"
    );

    Ok(HumidifierRuntime {
        sim,
        manager,
        names: project.humidifiers.iter().map(|h| h.name.clone()).collect(),
    })
}

fn build_context(project: &Project) -> SimContext {
    let env = &project.environment;
    let run = &project.run;
    let mut ctx = SimContext::new().with_time_step(s(project.timestep.system_s));
    ctx.env = Environment {
        baro_press: pa(env.baro_press_pa),
        outdoor_dry_bulb: degc(env.outdoor_dry_bulb_c),
        outdoor_hum_rat: env.outdoor_hum_rat,
        water_mains_temp: degc(env.water_mains_temp_c),
    };
    ctx.flags = SimFlags {
        display_extra_warnings: run.display_extra_warnings,
        do_setpoint_test: run.do_setpoint_test,
        any_ems_in_model: run.any_ems_in_model || project.nodes.iter().any(|n| n.ems_setpoint),
        co2_simulation: run.co2_simulation,
        generic_contam_simulation: run.generic_contam_simulation,
        ..SimFlags::default()
    };
    ctx
}

fn apply_node(sim: &mut SimState, def: &NodeDef) -> AppResult<()> {
    let id = sim.nodes.add_node(def.name.clone());
    let baro = sim.ctx.env.baro_press_pa();
    let enthalpy = match (def.temperature_c, def.hum_rat) {
        (Some(t), Some(w)) => Some(sim.psych.enthalpy_from_tdb_w(t, w)),
        _ => None,
    };
    let node = sim.nodes.node_mut(id)?;
    if let Some(t) = def.temperature_c {
        node.temp = t;
    }
    if let Some(w) = def.hum_rat {
        node.hum_rat = w;
    }
    if let Some(h) = enthalpy {
        node.enthalpy = h;
    }
    if let Some(m) = def.mass_flow_kgps {
        node.mass_flow_rate = m;
        node.mass_flow_rate_max_avail = m;
        node.mass_flow_rate_max = m;
    }
    node.press = def.pressure_pa.unwrap_or(baro);
    if let Some(w) = def.hum_rat_min_setpoint {
        node.hum_rat_min = w;
    }
    if let Some(c) = def.co2_ppm {
        node.co2 = c;
    }
    if let Some(c) = def.generic_contaminant {
        node.gen_contam = c;
    }
    Ok(())
}

fn build_curve(def: &CurveDef) -> Curve {
    let form = match &def.form {
        CurveFormDef::Linear { c0, c1 } => CurveForm::Linear { c0: *c0, c1: *c1 },
        CurveFormDef::Quadratic { c0, c1, c2 } => CurveForm::Quadratic {
            c0: *c0,
            c1: *c1,
            c2: *c2,
        },
        CurveFormDef::Cubic { c0, c1, c2, c3 } => CurveForm::Cubic {
            c0: *c0,
            c1: *c1,
            c2: *c2,
            c3: *c3,
        },
        CurveFormDef::Biquadratic { c } => CurveForm::Biquadratic { c: *c },
    };
    let mut curve = Curve::new(def.name.clone(), form);
    curve.min_x = def.min_x;
    curve.max_x = def.max_x;
    curve.min_output = def.min_output;
    curve.max_output = def.max_output;
    curve
}

fn build_sizing(def: &SizingDef) -> SizingState {
    let mut sizing = SizingState::new();
    sizing.zone_sizing_run_done = def.zone_sizing_run_done;
    sizing.sys_sizing_run_done = def.sys_sizing_run_done;
    sizing.target = match &def.target {
        SizingTargetDef::None => SizingTarget::None,
        SizingTargetDef::Zone { index } => SizingTarget::Zone(*index),
        SizingTargetDef::AirLoop {
            system,
            outdoor_air,
            duct,
        } => SizingTarget::AirLoop {
            system: *system,
            outdoor_air: *outdoor_air,
            duct: match duct {
                DuctDef::Main => DuctType::Main,
                DuctDef::Cooling => DuctType::Cooling,
                DuctDef::Heating => DuctType::Heating,
                DuctDef::Other => DuctType::Other,
            },
        },
    };
    sizing.zone = def
        .zone
        .iter()
        .map(|z| ZoneSizingData {
            des_cool_vol_flow: z.des_cool_vol_flow,
            des_heat_vol_flow: z.des_heat_vol_flow,
            des_cool_dens: z.des_cool_dens,
            out_hum_rat_at_heat_peak: z.out_hum_rat_at_heat_peak,
            out_hum_rat_at_cool_peak: z.out_hum_rat_at_cool_peak,
            zone_hum_rat_at_heat_peak: z.zone_hum_rat_at_heat_peak,
            zone_hum_rat_at_cool_peak: z.zone_hum_rat_at_cool_peak,
        })
        .collect();
    sizing.system = def
        .system
        .iter()
        .map(|sys| SystemSizingData {
            des_main_vol_flow: sys.des_main_vol_flow,
            des_cool_vol_flow: sys.des_cool_vol_flow,
            des_heat_vol_flow: sys.des_heat_vol_flow,
            des_out_air_vol_flow: sys.des_out_air_vol_flow,
            out_hum_rat_at_cool_peak: sys.out_hum_rat_at_cool_peak,
            heat_out_hum_rat: sys.heat_out_hum_rat,
            mix_temp_at_cool_peak: sys.mix_temp_at_cool_peak,
            mix_hum_rat_at_cool_peak: sys.mix_hum_rat_at_cool_peak,
            heat_mix_hum_rat: sys.heat_mix_hum_rat,
            cool_sup_hum_rat: sys.cool_sup_hum_rat,
            heat_sup_hum_rat: sys.heat_sup_hum_rat,
        })
        .collect();
    if let Some(t) = def.autosize_threshold {
        sizing.autosize_threshold = t;
    }
    sizing
}

/// Convert a project humidifier into loader input.
pub fn humidifier_object(def: &HumidifierDef) -> HumidifierObject {
    let kind = match &def.kind {
        HumidifierKindDef::ElectricSteam => HumidifierInputKind::ElectricSteam,
        HumidifierKindDef::GasSteam {
            thermal_efficiency,
            efficiency_curve,
            inlet_water_temperature_option,
        } => HumidifierInputKind::GasSteam {
            thermal_efficiency: *thermal_efficiency,
            efficiency_curve: efficiency_curve.clone(),
            inlet_water_temperature_option: inlet_water_temperature_option.clone(),
        },
    };
    HumidifierObject {
        name: def.name.clone(),
        kind,
        availability_schedule: def.availability_schedule.clone(),
        nominal_capacity_volume: def.nominal_capacity_m3ps.or_sentinel(AUTOSIZE),
        rated_power: def.rated_power_w.or_sentinel(AUTOSIZE),
        fan_power: def.fan_power_w,
        standby_power: def.standby_power_w,
        air_inlet_node: def.air_inlet_node.clone(),
        air_outlet_node: def.air_outlet_node.clone(),
        water_storage_tank: def.water_storage_tank.clone(),
    }
}

/// Inlet and outlet node names of a humidifier.
pub fn lookup_nodes(project: &Project, name: &str) -> AppResult<(String, String)> {
    let mut rt = compile_project(project)?;
    let inlet = rt
        .manager
        .air_inlet_node(&mut rt.sim, name)
        .map_err(|_| AppError::HumidifierNotFound(name.to_string()))?;
    let outlet = rt
        .manager
        .air_outlet_node(&mut rt.sim, name)
        .map_err(|_| AppError::HumidifierNotFound(name.to_string()))?;
    Ok((
        rt.sim.nodes.node_name(inlet).to_string(),
        rt.sim.nodes.node_name(outlet).to_string(),
    ))
}
