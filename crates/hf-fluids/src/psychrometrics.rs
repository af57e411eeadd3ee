//! Moist-air property relations.

use hf_core::units::constants::KELVIN_CONV;

/// Lower bound applied to humidity ratios entering enthalpy relations [kg/kg].
pub const MIN_HUM_RAT: f64 = 1.0e-5;

/// Trait for moist-air property providers.
///
/// Implementations must be thread-safe (Send + Sync) and pure: the same inputs
/// always give the same outputs. Temperatures are °C, pressures Pa, enthalpies
/// J/kg dry air, humidity ratios kg water / kg dry air.
pub trait Psychrometrics: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Saturation pressure of water vapour [Pa] at dry-bulb temperature.
    fn psat_from_temp(&self, tdb: f64) -> f64;

    /// Humidity ratio from dry-bulb temperature, relative humidity (0..1) and
    /// barometric pressure. With `rh = 1.0` this is the saturation curve.
    fn hum_rat_from_tdb_rh_pb(&self, tdb: f64, rh: f64, pb: f64) -> f64;

    /// Moist-air enthalpy from dry-bulb temperature and humidity ratio.
    fn enthalpy_from_tdb_w(&self, tdb: f64, w: f64) -> f64;

    /// Dry-bulb temperature from enthalpy and humidity ratio.
    ///
    /// Exact inverse of [`Psychrometrics::enthalpy_from_tdb_w`].
    fn tdb_from_enthalpy_w(&self, h: f64, w: f64) -> f64;

    /// Moist-air density [kg/m3].
    fn rho_air_from_pb_tdb_w(&self, pb: f64, tdb: f64, w: f64) -> f64;

    /// Liquid water density [kg/m3] at temperature.
    fn rho_water(&self, t: f64) -> f64;
}

/// ASHRAE Handbook Fundamentals correlations (Hyland-Wexler saturation
/// pressure, ideal-gas mixing), in the form used by building energy codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AshraePsychrometrics;

impl AshraePsychrometrics {
    pub fn new() -> Self {
        Self
    }
}

// Hyland-Wexler coefficients, over ice (T < 0 °C) and over liquid water.
const C1: f64 = -5.674_535_9e3;
const C2: f64 = 6.392_524_7;
const C3: f64 = -9.677_843e-3;
const C4: f64 = 6.221_570_1e-7;
const C5: f64 = 2.074_782_5e-9;
const C6: f64 = -9.484_024e-13;
const C7: f64 = 4.163_501_9;
const C8: f64 = -5.800_220_6e3;
const C9: f64 = 1.391_499_3;
const C10: f64 = -4.864_023_9e-2;
const C11: f64 = 4.176_476_8e-5;
const C12: f64 = -1.445_209_3e-8;
const C13: f64 = 6.545_967_3;

/// Ratio of molecular weights of water vapour and dry air.
const MW_RATIO: f64 = 0.621_98;

impl Psychrometrics for AshraePsychrometrics {
    fn name(&self) -> &str {
        "ASHRAE"
    }

    fn psat_from_temp(&self, tdb: f64) -> f64 {
        let t = tdb.clamp(-100.0, 200.0) + KELVIN_CONV;
        let ln_p = if tdb < 0.0 {
            C1 / t + C2 + C3 * t + C4 * t.powi(2) + C5 * t.powi(3) + C6 * t.powi(4) + C7 * t.ln()
        } else {
            C8 / t + C9 + C10 * t + C11 * t.powi(2) + C12 * t.powi(3) + C13 * t.ln()
        };
        ln_p.exp()
    }

    fn hum_rat_from_tdb_rh_pb(&self, tdb: f64, rh: f64, pb: f64) -> f64 {
        let p_dew = rh * self.psat_from_temp(tdb);
        let w = p_dew * MW_RATIO / (pb - p_dew);
        // Negative when the vapour pressure exceeds the barometric pressure.
        if w >= MIN_HUM_RAT {
            w
        } else {
            tracing::trace!(tdb, rh, pb, w, "humidity ratio floored");
            MIN_HUM_RAT
        }
    }

    fn enthalpy_from_tdb_w(&self, tdb: f64, w: f64) -> f64 {
        let w = w.max(MIN_HUM_RAT);
        1.004_84e3 * tdb + w * (2.500_94e6 + 1.858_95e3 * tdb)
    }

    fn tdb_from_enthalpy_w(&self, h: f64, w: f64) -> f64 {
        let w = w.max(MIN_HUM_RAT);
        (h - 2.500_94e6 * w) / (1.004_84e3 + 1.858_95e3 * w)
    }

    fn rho_air_from_pb_tdb_w(&self, pb: f64, tdb: f64, w: f64) -> f64 {
        pb / (287.0 * (tdb + KELVIN_CONV) * (1.0 + 1.607_768_7 * w.max(MIN_HUM_RAT)))
    }

    fn rho_water(&self, t: f64) -> f64 {
        1000.1207 + 8.321_587_4e-4 * t - 4.929_976e-3 * t.powi(2) + 8.479_186_3e-6 * t.powi(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::{Tolerances, nearly_equal};

    #[test]
    fn saturation_pressure_at_20c() {
        let psy = AshraePsychrometrics::new();
        let p = psy.psat_from_temp(20.0);
        // Handbook value 2339 Pa
        assert!((p - 2339.0).abs() < 5.0, "psat(20) = {p}");
    }

    #[test]
    fn saturation_pressure_below_freezing() {
        let psy = AshraePsychrometrics::new();
        let p = psy.psat_from_temp(-10.0);
        // Over ice: 259.9 Pa
        assert!((p - 260.0).abs() < 2.0, "psat(-10) = {p}");
    }

    #[test]
    fn saturation_humidity_ratio_at_50c() {
        let psy = AshraePsychrometrics::new();
        let w = psy.hum_rat_from_tdb_rh_pb(50.0, 1.0, 101_325.0);
        assert!((w - 0.0863).abs() < 0.001, "w_sat(50) = {w}");
    }

    #[test]
    fn humidity_ratio_floor() {
        let psy = AshraePsychrometrics::new();
        assert_eq!(psy.hum_rat_from_tdb_rh_pb(20.0, 0.0, 101_325.0), MIN_HUM_RAT);
    }

    #[test]
    fn enthalpy_inverse() {
        let psy = AshraePsychrometrics::new();
        let h = psy.enthalpy_from_tdb_w(50.0, 0.0075);
        let t = psy.tdb_from_enthalpy_w(h, 0.0075);
        assert!(nearly_equal(t, 50.0, Tolerances::default()));
    }

    #[test]
    fn water_density_at_reference() {
        let psy = AshraePsychrometrics::new();
        let rho = psy.rho_water(5.05);
        assert!((rho - 999.9).abs() < 0.2, "rho(5.05) = {rho}");
    }

    #[test]
    fn air_density_standard() {
        let psy = AshraePsychrometrics::new();
        let rho = psy.rho_air_from_pb_tdb_w(101_325.0, 20.0, 0.0);
        assert!((rho - 1.204).abs() < 0.005, "rho_air = {rho}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use hf_core::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn enthalpy_round_trip(tdb in -40.0_f64..80.0, w in 1.0e-5_f64..0.05) {
            let psy = AshraePsychrometrics::new();
            let h = psy.enthalpy_from_tdb_w(tdb, w);
            let back = psy.tdb_from_enthalpy_w(h, w);
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(back, tdb, tol));
        }

        #[test]
        fn saturation_curve_increases_with_temperature(tdb in 0.0_f64..60.0) {
            let psy = AshraePsychrometrics::new();
            let w1 = psy.hum_rat_from_tdb_rh_pb(tdb, 1.0, 101_325.0);
            let w2 = psy.hum_rat_from_tdb_rh_pb(tdb + 1.0, 1.0, 101_325.0);
            prop_assert!(w2 > w1);
        }
    }
}
