//! CoolProp-based water property backend.

use crate::error::{FluidError, FluidResult};
use crate::water::WaterProperties;
use hf_core::units::constants::{KELVIN_CONV, STD_BARO_PRESS_PA};
use rfluids::prelude::*;

/// CoolProp backend for water properties.
///
/// Thread-safe: rfluids Fluid instances are created per call.
#[derive(Debug, Default)]
pub struct CoolPropWater;

impl CoolPropWater {
    pub fn new() -> Self {
        Self
    }

    fn saturated(&self, t_c: f64, quality: f64) -> FluidResult<Fluid> {
        Fluid::from(Pure::Water)
            .in_state(
                FluidInput::temperature(t_c + KELVIN_CONV),
                FluidInput::quality(quality),
            )
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at T={t_c} °C, Q={quality}: {e}"),
            })
    }

    fn liquid(&self, t_c: f64) -> FluidResult<Fluid> {
        Fluid::from(Pure::Water)
            .in_state(
                FluidInput::pressure(STD_BARO_PRESS_PA),
                FluidInput::temperature(t_c + KELVIN_CONV),
            )
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at T={t_c} °C: {e}"),
            })
    }
}

impl WaterProperties for CoolPropWater {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn sat_enthalpy(&self, t_c: f64, quality: f64) -> FluidResult<f64> {
        let mut fluid = self.saturated(t_c, quality)?;
        fluid.enthalpy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting enthalpy: {e}"),
        })
    }

    fn specific_heat(&self, t_c: f64) -> FluidResult<f64> {
        let mut fluid = self.liquid(t_c)?;
        fluid.specific_heat().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting specific heat: {e}"),
        })
    }
}
