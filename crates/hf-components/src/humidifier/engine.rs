//! Per-call pipeline: init, control, calculate, water accounting, node
//! update and report.

use hf_core::units::constants::INIT_CONV_TEMP_C;
use hf_sim::SimState;

use super::mixing::saturation_limited_mix;
use super::model::{AirState, Humidifier, HumidifierKind, InletWaterTemp};
use super::sizing::steam_energy_per_kg;
use crate::error::ComponentResult;

/// Inlet flows at or below this are treated as no flow [kg/s].
pub const SMALL_MASS_FLOW: f64 = 1.0e-10;

impl Humidifier {
    /// Run the full pipeline once.
    pub fn simulate(&mut self, sim: &mut SimState) -> ComponentResult<()> {
        self.init(sim)?;
        let demand = self.control(sim);
        self.calculate(sim, demand)?;
        self.update_water_system(sim)?;
        self.update_nodes(sim)?;
        self.report(sim);
        Ok(())
    }

    /// Size on first call, check the outlet setpoint once, and load the
    /// inlet state. Rates from the previous call are cleared.
    pub fn init(&mut self, sim: &mut SimState) -> ComponentResult<()> {
        if self.flags.size {
            self.size(sim)?;
            self.flags.size = false;
        }

        let flags = sim.ctx.flags;
        if !flags.sys_sizing_calc && self.flags.setpoint_check && flags.do_setpoint_test {
            self.check_setpoint(sim)?;
            self.flags.setpoint_check = false;
        }

        if flags.begin_environment && self.flags.envrn {
            self.water = Default::default();
            if let HumidifierKind::GasSteam(g) = &mut self.kind {
                g.cur_makeup_water_temp = 0.0;
            }
            self.flags.envrn = false;
        }
        if !flags.begin_environment {
            self.flags.envrn = true;
        }

        self.hum_rat_set = sim.nodes.node(self.air_out_node)?.hum_rat_min;
        let inlet = sim.nodes.node(self.air_in_node)?;
        self.inlet = AirState {
            temp: inlet.temp,
            hum_rat: inlet.hum_rat,
            enthalpy: inlet.enthalpy,
            mass_flow_rate: inlet.mass_flow_rate,
        };
        self.reset_rates();
        Ok(())
    }

    fn check_setpoint(&self, sim: &mut SimState) -> ComponentResult<()> {
        let out = sim.nodes.node(self.air_out_node)?;
        if out.has_hum_rat_min_setpoint() {
            return Ok(());
        }
        let node_name = out.name.clone();
        let ems = sim.ctx.flags.any_ems_in_model;
        if ems && sim.ctx.ems_manages_hum_rat_min(self.air_out_node) {
            return Ok(());
        }
        sim.ctx.setpoint_error_flag = true;
        let diag = sim
            .diagnostics
            .severe(format!(
                "Humidifiers: Missing humidity setpoint for {} = {}",
                self.object_type(),
                self.name
            ))
            .cont("  use a Setpoint Manager with Control Variable = \"MinimumHumidityRatio\" to establish a setpoint at the humidifier outlet node.")
            .cont(format!("  expecting it on Node=\"{node_name}\"."));
        if ems {
            diag.cont("  or use an EMS actuator to control minimum humidity ratio to establish a setpoint at the humidifier outlet node.");
        }
        Ok(())
    }

    /// Moisture the unit should add to reach the setpoint [kg/s]; zero when
    /// the unit is off.
    pub fn control(&self, sim: &SimState) -> f64 {
        let inlet = &self.inlet;
        let on = self.hum_rat_set > 0.0
            && inlet.mass_flow_rate > SMALL_MASS_FLOW
            && sim.schedules.current_value(self.schedule) > 0.0
            && inlet.hum_rat < self.hum_rat_set
            && inlet.hum_rat
                < sim
                    .psych
                    .hum_rat_from_tdb_rh_pb(inlet.temp, 1.0, sim.ctx.env.baro_press_pa());
        if on {
            inlet.mass_flow_rate * (self.hum_rat_set - inlet.hum_rat)
        } else {
            0.0
        }
    }

    /// Apply the moisture demand and compute the resulting energy use.
    pub fn calculate(&mut self, sim: &SimState, water_add_needed: f64) -> ComponentResult<()> {
        let water_add_max = water_add_needed.min(self.nom_cap);
        let mix = saturation_limited_mix(
            sim.psych.as_ref(),
            &self.inlet,
            water_add_max,
            sim.ctx.env.baro_press_pa(),
        );
        self.outlet = mix.outlet;
        self.water_add = mix.water_add;

        let sched_on = sim.schedules.current_value(self.schedule) > 0.0;
        let load = self.water_add / self.nom_cap;
        let (nom_power, fan, standby) = (self.nom_power, self.fan_power, self.standby_power);

        match &mut self.kind {
            HumidifierKind::ElectricSteam(e) => {
                e.elec_use_rate = if self.water_add > 0.0 {
                    load * nom_power + fan + standby
                } else if sched_on {
                    standby
                } else {
                    0.0
                };
            }
            HumidifierKind::GasSteam(g) => {
                if self.water_add > 0.0 {
                    let gas_at_rated_eff = match g.inlet_water_temp {
                        InletWaterTemp::Fixed => load * nom_power,
                        InletWaterTemp::Variable => {
                            let t_makeup = match (self.water_tank, g.tank_supply_slot) {
                                (Some(link), Some(slot)) => {
                                    sim.tanks.supply_temperature(link.tank, slot)?
                                }
                                _ => sim.ctx.env.water_mains_temp_c(),
                            };
                            g.cur_makeup_water_temp = t_makeup;
                            self.water_add * steam_energy_per_kg(sim, t_makeup)? / g.thermal_eff_rated
                        }
                    };
                    let plr = gas_at_rated_eff / nom_power;
                    let modifier = match g.efficiency_curve {
                        Some(curve) => sim.curves.value(curve, plr)?,
                        None => 1.0,
                    };
                    g.thermal_eff = g.thermal_eff_rated * modifier;
                    // A zero modifier leaves the gas rate as it was.
                    if modifier != 0.0 {
                        g.gas_use_rate = gas_at_rated_eff / modifier;
                    }
                    g.aux_elec_use_rate = fan + standby;
                } else if sched_on {
                    g.aux_elec_use_rate = standby;
                } else {
                    g.aux_elec_use_rate = 0.0;
                }
            }
        }

        self.water.cons_rate = self.water_add / sim.psych.rho_water(INIT_CONV_TEMP_C);
        self.outlet.mass_flow_rate = self.inlet.mass_flow_rate;
        tracing::debug!(
            name = %self.name,
            demand = water_add_needed,
            water_add = self.water_add,
            "humidifier calculated"
        );
        Ok(())
    }

    /// Post the water request to the linked tank and split it into tank
    /// and starved supply.
    pub fn update_water_system(&mut self, sim: &mut SimState) -> ComponentResult<()> {
        let Some(link) = self.water_tank else {
            return Ok(());
        };
        let request = self.water.cons_rate;
        sim.tanks.request_demand(link.tank, link.demand_slot, request)?;
        let avail = sim.tanks.available_demand(link.tank, link.demand_slot)?;

        let mut starved = 0.0;
        let mut tank_supply = request;
        if avail < request && !sim.ctx.flags.begin_time_step {
            starved = request - avail;
            tank_supply = avail;
        }
        let dt = sim.ctx.time_step_seconds();
        self.water.tank_supply_vdot = tank_supply;
        self.water.tank_supply_vol = tank_supply * dt;
        self.water.starved_supply_vdot = starved;
        self.water.starved_supply_vol = starved * dt;
        Ok(())
    }

    /// Write the outlet state; pass the remaining fields through from the inlet.
    pub fn update_nodes(&self, sim: &mut SimState) -> ComponentResult<()> {
        let inlet = sim.nodes.node(self.air_in_node)?;
        let (quality, press) = (inlet.quality, inlet.press);
        let (flow_min, flow_max) = (inlet.mass_flow_rate_min, inlet.mass_flow_rate_max);
        let (min_avail, max_avail) = (
            inlet.mass_flow_rate_min_avail,
            inlet.mass_flow_rate_max_avail,
        );
        let co2 = sim.ctx.flags.co2_simulation.then_some(inlet.co2);
        let generic = sim
            .ctx
            .flags
            .generic_contam_simulation
            .then_some(inlet.gen_contam);

        let out = sim.nodes.node_mut(self.air_out_node)?;
        out.mass_flow_rate = self.outlet.mass_flow_rate;
        out.temp = self.outlet.temp;
        out.hum_rat = self.outlet.hum_rat;
        out.enthalpy = self.outlet.enthalpy;
        out.quality = quality;
        out.press = press;
        out.mass_flow_rate_min = flow_min;
        out.mass_flow_rate_max = flow_max;
        out.mass_flow_rate_min_avail = min_avail;
        out.mass_flow_rate_max_avail = max_avail;
        if let Some(co2) = co2 {
            out.co2 = co2;
        }
        if let Some(gen_contam) = generic {
            out.gen_contam = gen_contam;
        }
        Ok(())
    }

    /// Convert rates into quantities over the system timestep and publish.
    pub fn report(&mut self, sim: &mut SimState) {
        let dt = sim.ctx.time_step_seconds();
        self.water.cons = self.water.cons_rate * dt;
        match &mut self.kind {
            HumidifierKind::ElectricSteam(e) => {
                e.elec_use_energy = e.elec_use_rate * dt;
            }
            HumidifierKind::GasSteam(g) => {
                g.gas_use_energy = g.gas_use_rate * dt;
                g.aux_elec_use_energy = g.aux_elec_use_rate * dt;
            }
        }
        self.publish(&mut sim.outputs);
    }
}
