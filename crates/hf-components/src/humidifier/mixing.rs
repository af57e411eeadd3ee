//! Steam injection into moist air, limited by the saturation curve.

use hf_fluids::Psychrometrics;

use super::model::AirState;

/// Enthalpy of the injected steam, saturated vapour at 100 °C [J/kg].
pub const STEAM_ENTHALPY: f64 = 2_676_125.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixOutcome {
    pub outlet: AirState,
    /// Water actually added [kg/s].
    pub water_add: f64,
}

/// Add up to `water_add_max` kg/s of steam to the inlet stream.
///
/// The trial outlet assumes all steam is absorbed. If that point lies above the
/// saturation curve, the mixing line from inlet to trial outlet is intersected
/// with the chord of the saturation curve between the inlet and trial
/// temperatures; the outlet is then placed on the saturation curve at the
/// temperature of that intersection and the water added is recomputed from it.
/// The chord lies above the curve, so the result is slightly under the true
/// crossing, never over it.
pub fn saturation_limited_mix(
    psych: &dyn Psychrometrics,
    inlet: &AirState,
    water_add_max: f64,
    baro_press: f64,
) -> MixOutcome {
    let passthrough = MixOutcome {
        outlet: *inlet,
        water_add: 0.0,
    };
    let m = inlet.mass_flow_rate;
    if water_add_max <= 0.0 || m <= 0.0 {
        return passthrough;
    }

    let w_in = inlet.hum_rat;
    let t_in = inlet.temp;
    let h_out = (m * inlet.enthalpy + water_add_max * STEAM_ENTHALPY) / m;
    let w_out = (m * w_in + water_add_max) / m;
    let t_out = psych.tdb_from_enthalpy_w(h_out, w_out);
    let w_sat_out = psych.hum_rat_from_tdb_rh_pb(t_out, 1.0, baro_press);

    if w_out <= w_sat_out {
        return MixOutcome {
            outlet: AirState {
                temp: t_out,
                hum_rat: w_out,
                enthalpy: h_out,
                mass_flow_rate: m,
            },
            water_add: water_add_max,
        };
    }

    let w_sat_in = psych.hum_rat_from_tdb_rh_pb(t_in, 1.0, baro_press);
    let denom = w_out - w_sat_out + w_sat_in - w_in;
    if denom <= 0.0 {
        // Inlet already at or above saturation.
        return passthrough;
    }
    let w_cross = w_in + (w_out - w_in) * (w_sat_in - w_in) / denom;
    let t_cross = t_in + (w_cross - w_in) * ((t_out - t_in) / (w_out - w_in));
    let w_final = psych.hum_rat_from_tdb_rh_pb(t_cross, 1.0, baro_press);
    let h_final = psych.enthalpy_from_tdb_w(t_cross, w_final);
    tracing::trace!(t_cross, w_final, "mixing line clipped at saturation");

    MixOutcome {
        outlet: AirState {
            temp: t_cross,
            hum_rat: w_final,
            enthalpy: h_final,
            mass_flow_rate: m,
        },
        water_add: m * (w_final - w_in),
    }
}
