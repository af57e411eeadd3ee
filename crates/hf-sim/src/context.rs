//! Environment, timestep and phase flags.

use std::collections::HashSet;

use hf_core::units::constants::{SEC_IN_HOUR, STD_BARO_PRESS_PA};
use hf_core::units::{Pressure, Temperature, Time, degc, pa, s, to_degc};
use hf_core::NodeId;
use uom::si::pressure::pascal;
use uom::si::time::second;

/// Outdoor conditions for the current timestep.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub baro_press: Pressure,
    pub outdoor_dry_bulb: Temperature,
    /// Outdoor humidity ratio [kg/kg].
    pub outdoor_hum_rat: f64,
    pub water_mains_temp: Temperature,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            baro_press: pa(STD_BARO_PRESS_PA),
            outdoor_dry_bulb: degc(20.0),
            outdoor_hum_rat: 0.008,
            water_mains_temp: degc(10.0),
        }
    }
}

impl Environment {
    pub fn baro_press_pa(&self) -> f64 {
        self.baro_press.get::<pascal>()
    }

    pub fn outdoor_dry_bulb_c(&self) -> f64 {
        to_degc(self.outdoor_dry_bulb)
    }

    pub fn water_mains_temp_c(&self) -> f64 {
        to_degc(self.water_mains_temp)
    }
}

/// Phase and feature switches read by equipment models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimFlags {
    pub begin_environment: bool,
    pub begin_time_step: bool,
    pub sys_sizing_calc: bool,
    pub do_setpoint_test: bool,
    pub display_extra_warnings: bool,
    pub any_ems_in_model: bool,
    pub co2_simulation: bool,
    pub generic_contam_simulation: bool,
}

#[derive(Debug, Clone)]
pub struct SimContext {
    pub env: Environment,
    pub flags: SimFlags,
    /// Length of the current system timestep.
    pub time_step_sys: Time,
    /// Set when any component finds a required setpoint missing.
    pub setpoint_error_flag: bool,
    ems_hum_rat_min_nodes: HashSet<NodeId>,
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            flags: SimFlags::default(),
            time_step_sys: s(SEC_IN_HOUR / 4.0),
            setpoint_error_flag: false,
            ems_hum_rat_min_nodes: HashSet::new(),
        }
    }
}

impl SimContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_step(mut self, dt: Time) -> Self {
        self.time_step_sys = dt;
        self
    }

    pub fn time_step_seconds(&self) -> f64 {
        self.time_step_sys.get::<second>()
    }

    /// Mark a node whose minimum humidity-ratio setpoint is written by an
    /// external energy management program.
    pub fn set_ems_hum_rat_min_actuator(&mut self, node: NodeId) {
        self.ems_hum_rat_min_nodes.insert(node);
    }

    pub fn ems_manages_hum_rat_min(&self, node: NodeId) -> bool {
        self.ems_hum_rat_min_nodes.contains(&node)
    }
}
