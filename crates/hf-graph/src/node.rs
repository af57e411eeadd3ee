//! Air node state.

/// Value a setpoint field holds until something writes it.
pub const SENSED_NODE_FLAG: f64 = -999.0;

/// State of one air node.
///
/// Units: temperature °C, humidity ratio kg/kg, enthalpy J/kg, mass flow
/// kg/s, pressure Pa, CO2 ppm.
#[derive(Debug, Clone, PartialEq)]
pub struct AirNode {
    pub name: String,
    pub temp: f64,
    pub hum_rat: f64,
    pub enthalpy: f64,
    pub mass_flow_rate: f64,
    pub mass_flow_rate_min: f64,
    pub mass_flow_rate_max: f64,
    pub mass_flow_rate_min_avail: f64,
    pub mass_flow_rate_max_avail: f64,
    pub press: f64,
    pub quality: f64,
    pub co2: f64,
    pub gen_contam: f64,
    /// Minimum humidity-ratio setpoint; [`SENSED_NODE_FLAG`] when unset.
    pub hum_rat_min: f64,
    pub hum_rat_max: f64,
}

impl AirNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temp: 0.0,
            hum_rat: 0.0,
            enthalpy: 0.0,
            mass_flow_rate: 0.0,
            mass_flow_rate_min: 0.0,
            mass_flow_rate_max: 0.0,
            mass_flow_rate_min_avail: 0.0,
            mass_flow_rate_max_avail: 0.0,
            press: 0.0,
            quality: 0.0,
            co2: 0.0,
            gen_contam: 0.0,
            hum_rat_min: SENSED_NODE_FLAG,
            hum_rat_max: SENSED_NODE_FLAG,
        }
    }

    /// Whether a minimum humidity-ratio setpoint has been written.
    pub fn has_hum_rat_min_setpoint(&self) -> bool {
        self.hum_rat_min != SENSED_NODE_FLAG
    }
}
