// hf-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

/// Temperature from degrees Celsius.
#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Degrees Celsius of a temperature.
#[inline]
pub fn to_degc(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

pub mod constants {
    pub const SEC_IN_HOUR: f64 = 3600.0;
    pub const KELVIN_CONV: f64 = 273.15;
    /// Standard sea-level barometric pressure [Pa].
    pub const STD_BARO_PRESS_PA: f64 = 101_325.0;
    /// Volume-to-mass conversion temperature for water [°C].
    pub const INIT_CONV_TEMP_C: f64 = 5.05;
}
