//! End-to-end humidifier calls against a small hand-built model.

use hf_components::humidifier::{steam_energy_per_kg, HumidifierInputKind};
use hf_components::{ComponentError, HumidifierKind, HumidifierManager, HumidifierObject};
use hf_controls::{Curve, CurveForm, ScheduleKind};
use hf_core::units::constants::INIT_CONV_TEMP_C;
use hf_core::{EquipId, Tolerances, nearly_equal, s};
use hf_sim::{
    AUTOSIZE, DuctType, Severity, SimState, SizingTarget, SystemSizingData, ZoneSizingData,
};

const TIGHT: Tolerances = Tolerances {
    abs: 1e-12,
    rel: 1e-9,
};

fn set_inlet(sim: &mut SimState, node: &str, temp: f64, hum_rat: f64, flow: f64) {
    let id = sim.nodes.find_node(node).unwrap();
    let h = sim.psych.enthalpy_from_tdb_w(temp, hum_rat);
    let n = sim.nodes.node_mut(id).unwrap();
    n.temp = temp;
    n.hum_rat = hum_rat;
    n.enthalpy = h;
    n.mass_flow_rate = flow;
    n.press = 101_325.0;
    n.mass_flow_rate_max_avail = 2.0;
}

fn set_setpoint(sim: &mut SimState, node: &str, hum_rat: f64) {
    let id = sim.nodes.find_node(node).unwrap();
    sim.nodes.node_mut(id).unwrap().hum_rat_min = hum_rat;
}

/// Capacity volume that gives `kg_per_s` of nominal water capacity.
fn capacity_volume(sim: &SimState, kg_per_s: f64) -> f64 {
    kg_per_s / sim.psych.rho_water(INIT_CONV_TEMP_C)
}

fn loaded(objects: Vec<HumidifierObject>, sim: &mut SimState) -> HumidifierManager {
    let mut mgr = HumidifierManager::new(objects);
    mgr.get_input(sim).unwrap();
    mgr
}

#[test]
fn demand_met_exactly_below_capacity() {
    let mut sim = SimState::new();
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out")
            .with_capacity(0.001)
            .with_power(3000.0, 0.0, 0.0)],
        &mut sim,
    );
    set_inlet(&mut sim, "In", 50.0, 0.0075, 1.0);
    set_setpoint(&mut sim, "Out", 0.008);

    let mut idx = None;
    mgr.simulate(&mut sim, "H1", true, &mut idx).unwrap();
    assert_eq!(idx, Some(EquipId::from_usize(0)));

    let unit = &mgr.units()[0];
    assert!(nearly_equal(unit.water_add, 0.0005, TIGHT), "{}", unit.water_add);
    assert_eq!(unit.outlet.mass_flow_rate, 1.0);

    let out = sim.nodes.node(sim.nodes.find_node("Out").unwrap()).unwrap();
    assert!(nearly_equal(out.hum_rat, 0.008, TIGHT));
    assert_eq!(out.mass_flow_rate, 1.0);
    assert_eq!(out.press, 101_325.0);
    assert_eq!(out.mass_flow_rate_max_avail, 2.0);
    assert!(out.temp > 50.0);
}

#[test]
fn outlet_carries_inlet_flow_bounds() {
    let mut sim = SimState::new();
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out").with_capacity(0.001)],
        &mut sim,
    );
    set_inlet(&mut sim, "In", 25.0, 0.004, 0.8);
    let inlet = sim.nodes.find_node("In").unwrap();
    {
        let n = sim.nodes.node_mut(inlet).unwrap();
        n.quality = 1.0;
        n.mass_flow_rate_min = 0.1;
        n.mass_flow_rate_max = 1.5;
        n.mass_flow_rate_min_avail = 0.2;
    }
    set_setpoint(&mut sim, "Out", 0.005);
    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();

    let out = sim.nodes.node(sim.nodes.find_node("Out").unwrap()).unwrap();
    assert_eq!(out.quality, 1.0);
    assert_eq!(out.press, 101_325.0);
    assert_eq!(
        [
            out.mass_flow_rate_min,
            out.mass_flow_rate_max,
            out.mass_flow_rate_min_avail,
            out.mass_flow_rate_max_avail,
        ],
        [0.1, 1.5, 0.2, 2.0]
    );
    assert_eq!(out.mass_flow_rate, 0.8);
    assert_eq!(out.co2, 0.0);
}

#[test]
fn electric_rate_at_full_capacity() {
    let mut sim = SimState::new();
    let cap = capacity_volume(&sim, 0.0005);
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out")
            .with_capacity(cap)
            .with_power(1000.0, 10.0, 5.0)],
        &mut sim,
    );
    set_inlet(&mut sim, "In", 50.0, 0.0075, 1.0);
    set_setpoint(&mut sim, "Out", 0.0085);

    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();
    let unit = &mgr.units()[0];
    assert_eq!(unit.water_add, unit.nom_cap);
    assert!(nearly_equal(unit.electric_power(), 1015.0, TIGHT));
    let dt = sim.ctx.time_step_seconds();
    assert!(nearly_equal(unit.electric_energy(), 1015.0 * dt, TIGHT));
    // Hard-sized power below the ideal power is flagged.
    assert_eq!(
        sim.diagnostics
            .find(Severity::Warning, "specified Rated Power is less than nominal Rated Power")
            .count(),
        1
    );
}

#[test]
fn zero_flow_passes_inlet_through() {
    let mut sim = SimState::new();
    sim.schedules
        .add("Off", ScheduleKind::Constant { value: 0.0 })
        .unwrap();
    let mut mgr = loaded(
        vec![
            HumidifierObject::electric("On", "In1", "Out1")
                .with_capacity(0.001)
                .with_power(3000.0, 10.0, 5.0),
            HumidifierObject::electric("Off", "In2", "Out2")
                .with_schedule("Off")
                .with_capacity(0.001)
                .with_power(3000.0, 10.0, 5.0),
        ],
        &mut sim,
    );
    for (inlet, outlet) in [("In1", "Out1"), ("In2", "Out2")] {
        set_inlet(&mut sim, inlet, 20.0, 0.004, 0.0);
        set_setpoint(&mut sim, outlet, 0.008);
    }
    mgr.simulate(&mut sim, "On", true, &mut None).unwrap();
    mgr.simulate(&mut sim, "Off", true, &mut None).unwrap();

    for unit in mgr.units() {
        assert_eq!(unit.water_add, 0.0);
        assert_eq!(unit.outlet, unit.inlet);
        assert_eq!(unit.water.cons_rate, 0.0);
    }
    // Standby power follows the schedule only.
    assert_eq!(mgr.units()[0].electric_power(), 5.0);
    assert_eq!(mgr.units()[1].electric_power(), 0.0);
}

#[test]
fn saturated_inlet_adds_nothing() {
    let mut sim = SimState::new();
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out").with_capacity(0.001)],
        &mut sim,
    );
    let w_sat = sim.psych.hum_rat_from_tdb_rh_pb(10.0, 1.0, 101_325.0);
    set_inlet(&mut sim, "In", 10.0, w_sat, 1.0);
    set_setpoint(&mut sim, "Out", w_sat + 0.002);
    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();
    assert_eq!(mgr.units()[0].water_add, 0.0);
}

#[test]
fn lookup_failures_are_fatal() {
    let mut sim = SimState::new();
    let mut mgr = loaded(
        vec![
            HumidifierObject::electric("E1", "In1", "Out1"),
            HumidifierObject::electric("E2", "In2", "Out2"),
        ],
        &mut sim,
    );

    let mut idx = None;
    let err = mgr.simulate(&mut sim, "Nope", true, &mut idx).unwrap_err();
    assert_eq!(err, ComponentError::UnitNotFound { name: "Nope".into() });
    assert_eq!(idx, None);
    assert!(sim
        .diagnostics
        .find(Severity::Fatal, "SimHumidifier: Unit not found=Nope")
        .next()
        .is_some());

    let err = mgr
        .simulate(&mut sim, "E1", true, &mut Some(EquipId::from_usize(7)))
        .unwrap_err();
    assert!(matches!(err, ComponentError::InvalidIndex { stored: None, count: 2, .. }));

    let err = mgr
        .simulate(&mut sim, "E2", true, &mut Some(EquipId::from_usize(0)))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "SimHumidifier: Invalid CompIndex passed=1, Unit name=E2, stored Unit Name for that index=E1"
    );
    assert_eq!(sim.diagnostics.count(Severity::Fatal), 3);
}

#[test]
fn cached_handle_is_checked_once() {
    let mut sim = SimState::new();
    let mut mgr = loaded(
        vec![HumidifierObject::electric("E1", "In1", "Out1").with_capacity(0.001)],
        &mut sim,
    );
    set_inlet(&mut sim, "In1", 20.0, 0.004, 0.5);
    let mut idx = Some(EquipId::from_usize(0));
    mgr.simulate(&mut sim, "E1", true, &mut idx).unwrap();
    mgr.simulate(&mut sim, "E1", false, &mut idx).unwrap();
    assert_eq!(sim.diagnostics.count(Severity::Fatal), 0);
}

#[test]
fn missing_setpoint_is_reported_once() {
    let mut sim = SimState::new();
    sim.ctx.flags.do_setpoint_test = true;
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out").with_capacity(0.001)],
        &mut sim,
    );
    set_inlet(&mut sim, "In", 20.0, 0.004, 1.0);
    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();
    mgr.simulate(&mut sim, "H1", false, &mut None).unwrap();

    let missing: Vec<_> = sim
        .diagnostics
        .find(
            Severity::Severe,
            "Humidifiers: Missing humidity setpoint for Humidifier:Steam:Electric = H1",
        )
        .collect();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].continuations[1].contains("Node=\"Out\""));
    assert!(sim.ctx.setpoint_error_flag);
    // No setpoint means the unit stays off.
    assert_eq!(mgr.units()[0].water_add, 0.0);
}

#[test]
fn ems_actuated_setpoint_is_accepted() {
    let mut sim = SimState::new();
    sim.ctx.flags.do_setpoint_test = true;
    sim.ctx.flags.any_ems_in_model = true;
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out").with_capacity(0.001)],
        &mut sim,
    );
    let out = sim.nodes.find_node("Out").unwrap();
    sim.ctx.set_ems_hum_rat_min_actuator(out);
    set_inlet(&mut sim, "In", 20.0, 0.004, 1.0);
    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();
    assert_eq!(sim.diagnostics.count(Severity::Severe), 0);
    assert!(!sim.ctx.setpoint_error_flag);
}

#[test]
fn gas_unit_with_efficiency_curve() {
    let mut sim = SimState::new().with_context(hf_sim::SimContext::new().with_time_step(s(600.0)));
    sim.curves
        .add(Curve::new("EffMod", CurveForm::Linear { c0: 0.9, c1: 0.0 }))
        .unwrap();
    let cap = capacity_volume(&sim, 0.0005);
    let mut obj = HumidifierObject::gas("G1", "In", "Out", 0.8)
        .with_capacity(cap)
        .with_power(AUTOSIZE, 20.0, 4.0);
    if let HumidifierInputKind::GasSteam { efficiency_curve, .. } = &mut obj.kind {
        *efficiency_curve = Some("EffMod".into());
    }
    let mut mgr = loaded(vec![obj], &mut sim);
    set_inlet(&mut sim, "In", 30.0, 0.004, 1.0);
    set_setpoint(&mut sim, "Out", 0.006);
    mgr.simulate(&mut sim, "G1", true, &mut None).unwrap();

    let unit = &mgr.units()[0];
    let ideal = unit.nom_cap * steam_energy_per_kg(&sim, 20.0).unwrap();
    assert!(nearly_equal(unit.nom_power, ideal / 0.8, TIGHT));
    let HumidifierKind::GasSteam(gas) = &unit.kind else {
        panic!("expected gas unit");
    };
    assert!(nearly_equal(gas.thermal_eff, 0.72, TIGHT));
    assert!(nearly_equal(gas.gas_use_rate, unit.nom_power / 0.9, TIGHT));
    assert_eq!(gas.aux_elec_use_rate, 24.0);
    assert!(nearly_equal(gas.gas_use_energy, gas.gas_use_rate * 600.0, TIGHT));
    assert!(nearly_equal(gas.aux_elec_use_energy, 24.0 * 600.0, TIGHT));
    assert!(nearly_equal(unit.water.cons, unit.water.cons_rate * 600.0, TIGHT));

    let published = sim.outputs.find("Humidifier Gas Use Rate", "G1").unwrap();
    assert_eq!(published.value, gas.gas_use_rate);
}

#[test]
fn variable_inlet_water_uses_mains_temperature() {
    let mut sim = SimState::new();
    let cap = capacity_volume(&sim, 0.0005);
    let mut obj = HumidifierObject::gas("G1", "In", "Out", 0.8)
        .with_capacity(cap)
        .with_power(AUTOSIZE, 0.0, 0.0);
    if let HumidifierInputKind::GasSteam {
        inlet_water_temperature_option,
        ..
    } = &mut obj.kind
    {
        *inlet_water_temperature_option = Some("VariableInletWaterTemperature".into());
    }
    let mut mgr = loaded(vec![obj], &mut sim);
    set_inlet(&mut sim, "In", 30.0, 0.004, 1.0);
    set_setpoint(&mut sim, "Out", 0.0042);
    mgr.simulate(&mut sim, "G1", true, &mut None).unwrap();

    let unit = &mgr.units()[0];
    let HumidifierKind::GasSteam(gas) = &unit.kind else {
        panic!("expected gas unit");
    };
    let mains = sim.ctx.env.water_mains_temp_c();
    assert_eq!(gas.cur_makeup_water_temp, mains);
    let expected = unit.water_add * steam_energy_per_kg(&sim, mains).unwrap() / 0.8;
    assert!(nearly_equal(gas.gas_use_rate, expected, TIGHT));
    assert!(nearly_equal(gas.thermal_eff, 0.8, TIGHT));
}

#[test]
fn tank_shortfall_is_starved() {
    let mut sim = SimState::new();
    sim.tanks.add_tank("Tank", 1.0, 1.0e-4, 15.0).unwrap();
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out")
            .with_capacity(0.001)
            .with_water_tank("Tank")],
        &mut sim,
    );
    let dt = sim.ctx.time_step_seconds();
    sim.tanks.initialize_availability(dt);
    set_inlet(&mut sim, "In", 30.0, 0.004, 1.0);
    set_setpoint(&mut sim, "Out", 0.0045);

    sim.ctx.flags.begin_time_step = true;
    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();
    let unit = &mgr.units()[0];
    assert_eq!(unit.water.starved_supply_vdot, 0.0);
    assert_eq!(unit.water.tank_supply_vdot, unit.water.cons_rate);

    sim.ctx.flags.begin_time_step = false;
    mgr.simulate(&mut sim, "H1", false, &mut None).unwrap();
    let unit = &mgr.units()[0];
    let avail = 1.0e-4 / dt;
    assert!(nearly_equal(unit.water.tank_supply_vdot, avail, TIGHT));
    assert!(nearly_equal(
        unit.water.starved_supply_vdot,
        unit.water.cons_rate - avail,
        TIGHT
    ));
    assert!(nearly_equal(
        unit.water.starved_supply_vol,
        unit.water.starved_supply_vdot * dt,
        TIGHT
    ));
    let tank = sim.tanks.tank(sim.tanks.find("Tank").unwrap()).unwrap();
    assert_eq!(tank.demands[0].request, unit.water.cons_rate);
}

#[test]
fn zone_autosizing_records_design_values() {
    let mut sim = SimState::new();
    sim.sizing.zone_sizing_run_done = true;
    sim.sizing.target = SizingTarget::Zone(0);
    sim.sizing.zone.push(design_zone());
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out")
            .with_capacity(AUTOSIZE)
            .with_power(AUTOSIZE, 0.0, 0.0)],
        &mut sim,
    );
    set_inlet(&mut sim, "In", 20.0, 0.004, 0.0);
    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();

    let expected = 1.2 * 0.006 / sim.psych.rho_water(INIT_CONV_TEMP_C);
    let unit = &mgr.units()[0];
    assert!(nearly_equal(unit.nom_cap_vol, expected, TIGHT));
    let rec = sim
        .sizing
        .find_record("H1", "Design Size Nominal Capacity Volume [m3/s]")
        .unwrap();
    assert!(nearly_equal(rec.value, expected, TIGHT));
    let power = sim.sizing.find_record("H1", "Design Size Rated Power [W]").unwrap();
    assert!(nearly_equal(power.value, unit.nom_power, TIGHT));
}

fn design_zone() -> ZoneSizingData {
    ZoneSizingData {
        des_cool_vol_flow: 1.0,
        des_heat_vol_flow: 0.5,
        des_cool_dens: 1.2,
        out_hum_rat_at_heat_peak: 0.002,
        out_hum_rat_at_cool_peak: 0.01,
        zone_hum_rat_at_heat_peak: 0.006,
        zone_hum_rat_at_cool_peak: 0.008,
    }
}

fn design_system() -> SystemSizingData {
    SystemSizingData {
        des_main_vol_flow: 2.0,
        des_cool_vol_flow: 1.5,
        des_heat_vol_flow: 0.5,
        des_out_air_vol_flow: 0.4,
        out_hum_rat_at_cool_peak: 0.009,
        heat_out_hum_rat: 0.002,
        mix_temp_at_cool_peak: 24.0,
        mix_hum_rat_at_cool_peak: 0.007,
        heat_mix_hum_rat: 0.004,
        cool_sup_hum_rat: 0.006,
        heat_sup_hum_rat: 0.008,
    }
}

/// Autosize one electric unit on an air loop and return its sized capacity.
fn air_loop_capacity(sim: &mut SimState, outdoor_air: bool, duct: DuctType) -> f64 {
    sim.sizing.sys_sizing_run_done = true;
    sim.sizing.target = SizingTarget::AirLoop {
        system: 0,
        outdoor_air,
        duct,
    };
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out")
            .with_capacity(AUTOSIZE)
            .with_power(AUTOSIZE, 0.0, 0.0)],
        sim,
    );
    mgr.simulate(sim, "H1", true, &mut None).unwrap();
    mgr.units()[0].nom_cap_vol
}

#[test]
fn outdoor_air_humidifier_sizes_on_outdoor_flow() {
    let mut sim = SimState::new();
    sim.sizing.system.push(design_system());
    let cap = air_loop_capacity(&mut sim, true, DuctType::Main);

    let env = sim.ctx.env;
    let rho_air =
        sim.psych
            .rho_air_from_pb_tdb_w(env.baro_press_pa(), env.outdoor_dry_bulb_c(), env.outdoor_hum_rat);
    let expected = 0.4 * rho_air * (0.008 - 0.002) / sim.psych.rho_water(INIT_CONV_TEMP_C);
    assert!(nearly_equal(cap, expected, TIGHT), "{cap} vs {expected}");
}

#[test]
fn supply_duct_humidifier_sizes_on_its_branch_flow() {
    let cases = [
        (false, DuctType::Main, 2.0),
        (false, DuctType::Other, 2.0),
        (false, DuctType::Cooling, 1.5),
        (false, DuctType::Heating, 0.5),
        // No outdoor-air flow falls back to the supply duct.
        (true, DuctType::Cooling, 1.5),
    ];
    for (outdoor_air, duct, vol_flow) in cases {
        let mut sim = SimState::new();
        let mut sys = design_system();
        if outdoor_air {
            sys.des_out_air_vol_flow = 0.0;
        }
        sim.sizing.system.push(sys);
        let cap = air_loop_capacity(&mut sim, outdoor_air, duct);

        let rho_air = sim
            .psych
            .rho_air_from_pb_tdb_w(sim.ctx.env.baro_press_pa(), 24.0, 0.007);
        let expected = vol_flow * rho_air * (0.008 - 0.004) / sim.psych.rho_water(INIT_CONV_TEMP_C);
        assert!(nearly_equal(cap, expected, TIGHT), "{duct:?}: {cap} vs {expected}");
    }
}

#[test]
fn hard_sized_mismatch_is_reported_with_extra_warnings() {
    for extra in [false, true] {
        let mut sim = SimState::new();
        sim.ctx.flags.display_extra_warnings = extra;
        sim.sizing.zone_sizing_run_done = true;
        sim.sizing.target = SizingTarget::Zone(0);
        sim.sizing.zone.push(design_zone());
        let design = capacity_volume(&sim, 1.2 * 0.006);
        let mut mgr = loaded(
            vec![HumidifierObject::electric("H1", "In", "Out")
                .with_capacity(2.0 * design)
                .with_power(1.0e5, 0.0, 0.0)],
            &mut sim,
        );
        mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();

        let des = sim
            .sizing
            .find_record("H1", "Design Size Nominal Capacity Volume [m3/s]")
            .unwrap();
        assert!(nearly_equal(des.value, design, TIGHT));
        let user = sim
            .sizing
            .find_record("H1", "User-Specified Rated Power [W]")
            .unwrap();
        assert_eq!(user.value, 1.0e5);

        let issues: Vec<_> = sim
            .diagnostics
            .find(Severity::Message, "Potential issue with equipment sizing")
            .collect();
        if extra {
            assert_eq!(issues.len(), 2);
            assert!(issues[0].mentions("User-Specified Nominal Capacity Volume of"));
            assert!(issues[1].mentions("differs from Design Size Rated Power of"));
        } else {
            assert!(issues.is_empty());
        }
        assert_eq!(sim.diagnostics.count(Severity::Warning), 0);
    }
}

#[test]
fn gas_rated_efficiency_follows_hard_sized_gas_rate() {
    let mut sim = SimState::new();
    let cap = capacity_volume(&sim, 0.0005);
    let ideal = 0.0005 * steam_energy_per_kg(&sim, 20.0).unwrap();
    let mut mgr = loaded(
        vec![
            HumidifierObject::gas("Over", "In1", "Out1", 0.8)
                .with_capacity(cap)
                .with_power(2.0 * ideal, 0.0, 0.0),
            HumidifierObject::gas("Under", "In2", "Out2", 0.8)
                .with_capacity(cap)
                .with_power(0.5 * ideal, 0.0, 0.0),
        ],
        &mut sim,
    );
    mgr.simulate(&mut sim, "Over", true, &mut None).unwrap();
    mgr.simulate(&mut sim, "Under", true, &mut None).unwrap();

    for (unit, eff) in mgr.units().iter().zip([0.5, 1.0]) {
        let HumidifierKind::GasSteam(gas) = &unit.kind else {
            panic!("expected gas unit");
        };
        assert!(nearly_equal(gas.thermal_eff_rated, eff, TIGHT), "{}", unit.name);
        assert!(nearly_equal(unit.nom_power, ideal, TIGHT), "{}", unit.name);
    }

    let mismatch: Vec<_> = sim
        .diagnostics
        .find(Severity::Message, "capacity and thermal efficiency mismatch")
        .collect();
    assert_eq!(mismatch.len(), 1);
    assert!(mismatch[0].message.contains("\"Under\""));
}

#[test]
fn zero_efficiency_modifier_keeps_gas_rate() {
    let mut sim = SimState::new();
    sim.curves
        .add(Curve::new("Zero", CurveForm::Linear { c0: 0.0, c1: 0.0 }))
        .unwrap();
    let cap = capacity_volume(&sim, 0.0005);
    let mut obj = HumidifierObject::gas("G1", "In", "Out", 0.8)
        .with_capacity(cap)
        .with_power(AUTOSIZE, 20.0, 4.0);
    if let HumidifierInputKind::GasSteam { efficiency_curve, .. } = &mut obj.kind {
        *efficiency_curve = Some("Zero".into());
    }
    let mut mgr = loaded(vec![obj], &mut sim);
    set_inlet(&mut sim, "In", 30.0, 0.004, 1.0);
    set_setpoint(&mut sim, "Out", 0.0042);
    mgr.simulate(&mut sim, "G1", true, &mut None).unwrap();

    let unit = &mgr.units()[0];
    assert!(unit.water_add > 0.0);
    let HumidifierKind::GasSteam(gas) = &unit.kind else {
        panic!("expected gas unit");
    };
    assert_eq!(gas.thermal_eff, 0.0);
    assert_eq!(gas.gas_use_rate, 0.0);
    assert_eq!(gas.gas_use_energy, 0.0);
    assert_eq!(gas.aux_elec_use_rate, 24.0);
}

#[test]
fn autosize_without_sizing_run_is_a_configuration_error() {
    let mut sim = SimState::new();
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out").with_capacity(AUTOSIZE)],
        &mut sim,
    );
    let err = mgr.simulate(&mut sim, "H1", true, &mut None).unwrap_err();
    assert_eq!(err.kind(), hf_components::ErrorKind::Configuration);
}

#[test]
fn contaminants_follow_global_flags() {
    let mut sim = SimState::new();
    sim.ctx.flags.co2_simulation = true;
    let mut mgr = loaded(
        vec![HumidifierObject::electric("H1", "In", "Out").with_capacity(0.001)],
        &mut sim,
    );
    set_inlet(&mut sim, "In", 20.0, 0.004, 1.0);
    let inlet = sim.nodes.find_node("In").unwrap();
    {
        let n = sim.nodes.node_mut(inlet).unwrap();
        n.co2 = 420.0;
        n.gen_contam = 3.0;
    }
    mgr.simulate(&mut sim, "H1", true, &mut None).unwrap();
    let out = sim.nodes.node(sim.nodes.find_node("Out").unwrap()).unwrap();
    assert_eq!(out.co2, 420.0);
    assert_eq!(out.gen_contam, 0.0);
}
