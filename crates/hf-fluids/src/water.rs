//! Water and steam property backends.

use crate::error::{FluidError, FluidResult};
use seuif97::{OCP, OH, pt, tx};

/// Pressure at which liquid properties are evaluated [MPa].
const LIQUID_PRESS_MPA: f64 = 0.101_325;

/// Trait for water/steam property providers.
///
/// Temperatures are °C. Enthalpies are J/kg, specific heat J/(kg·K).
/// Liquid density comes from [`crate::Psychrometrics::rho_water`].
pub trait WaterProperties: Send + Sync {
    /// Get the backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Enthalpy on the saturation line at temperature and quality
    /// (0 = saturated liquid, 1 = saturated vapour).
    fn sat_enthalpy(&self, t_c: f64, quality: f64) -> FluidResult<f64>;

    /// Isobaric specific heat of liquid water.
    fn specific_heat(&self, t_c: f64) -> FluidResult<f64>;

    /// Latent heat of vaporization `h_g - h_f` at temperature.
    fn latent_heat(&self, t_c: f64) -> FluidResult<f64> {
        Ok(self.sat_enthalpy(t_c, 1.0)? - self.sat_enthalpy(t_c, 0.0)?)
    }

    /// Mean liquid specific heat over `[t_low, t_high]` from the end points.
    fn average_specific_heat(&self, t_high: f64, t_low: f64) -> FluidResult<f64> {
        Ok(0.5 * (self.specific_heat(t_high)? + self.specific_heat(t_low)?))
    }
}

/// IAPWS-IF97 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct If97Water;

impl If97Water {
    pub fn new() -> Self {
        Self
    }
}

fn check_range(t_c: f64, what: &'static str) -> FluidResult<()> {
    if !t_c.is_finite() || !(0.0..=373.9).contains(&t_c) {
        return Err(FluidError::OutOfRange { what, value: t_c });
    }
    Ok(())
}

fn physical(v: f64, what: &'static str) -> FluidResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(FluidError::NonPhysical { what })
    }
}

impl WaterProperties for If97Water {
    fn name(&self) -> &str {
        "IF97"
    }

    fn sat_enthalpy(&self, t_c: f64, quality: f64) -> FluidResult<f64> {
        check_range(t_c, "saturation temperature")?;
        if !(0.0..=1.0).contains(&quality) {
            return Err(FluidError::OutOfRange {
                what: "steam quality",
                value: quality,
            });
        }
        let h_kj = tx(t_c, quality, OH);
        physical(h_kj, "saturated enthalpy").map(|h| h * 1000.0)
    }

    fn specific_heat(&self, t_c: f64) -> FluidResult<f64> {
        check_range(t_c, "liquid temperature")?;
        let cp_kj = pt(LIQUID_PRESS_MPA, t_c, (OCP, 1));
        physical(cp_kj, "liquid specific heat").map(|cp| cp * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturated_enthalpies_at_100c() {
        let water = If97Water::new();
        let hg = water.sat_enthalpy(100.0, 1.0).unwrap();
        let hf = water.sat_enthalpy(100.0, 0.0).unwrap();
        assert!((hg - 2_675_600.0).abs() < 1_000.0, "hg = {hg}");
        assert!((hf - 419_100.0).abs() < 1_000.0, "hf = {hf}");
        let latent = water.latent_heat(100.0).unwrap();
        assert!((latent - 2_256_500.0).abs() < 2_000.0, "hfg = {latent}");
    }

    #[test]
    fn liquid_specific_heat_at_20c() {
        let water = If97Water::new();
        let cp = water.specific_heat(20.0).unwrap();
        assert!((cp - 4184.0).abs() < 10.0, "cp = {cp}");
    }

    #[test]
    fn average_specific_heat_between_end_points() {
        let water = If97Water::new();
        let avg = water.average_specific_heat(100.0, 20.0).unwrap();
        let lo = water.specific_heat(20.0).unwrap();
        let hi = water.specific_heat(100.0).unwrap();
        assert!(avg >= lo.min(hi) && avg <= lo.max(hi));
    }

    #[test]
    fn rejects_out_of_range() {
        let water = If97Water::new();
        assert!(matches!(
            water.sat_enthalpy(500.0, 1.0),
            Err(FluidError::OutOfRange { .. })
        ));
        assert!(matches!(
            water.sat_enthalpy(100.0, 1.5),
            Err(FluidError::OutOfRange { .. })
        ));
        assert!(water.specific_heat(f64::NAN).is_err());
    }
}
