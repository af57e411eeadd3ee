//! Nominal capacity and rated power sizing.

use hf_core::{relative_difference, round_sig_digits};
use hf_core::units::constants::INIT_CONV_TEMP_C;
use hf_sim::{DuctType, SimState, SizingTarget, SystemSizingData, is_autosize};

use super::model::{Humidifier, HumidifierKind};
use crate::error::{ComponentError, ComponentResult};

const ROUTINE: &str = "Humidifier:SizeHumidifier";
/// Makeup-water reference temperature for rated power [°C].
pub const T_REF: f64 = 20.0;
/// Temperature of the generated steam [°C].
pub const T_STEAM: f64 = 100.0;

const DESC_CAP_DES: &str = "Design Size Nominal Capacity Volume [m3/s]";
const DESC_CAP_USER: &str = "User-Specified Nominal Capacity Volume [m3/s]";
const DESC_POWER_DES: &str = "Design Size Rated Power [W]";
const DESC_POWER_USER: &str = "User-Specified Rated Power [W]";

/// Design air flow and humidity ratios drawn from sizing data.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DesignPoint {
    mass_flow: f64,
    inlet_hum_rat: f64,
    outlet_hum_rat: f64,
}

/// Energy to raise water from `t_ref` and boil it at [`T_STEAM`] [J/kg].
pub fn steam_energy_per_kg(sim: &SimState, t_ref: f64) -> ComponentResult<f64> {
    let latent = sim.water.latent_heat(T_STEAM)?;
    let cp_avg = sim.water.average_specific_heat(T_STEAM, t_ref)?;
    Ok(latent + cp_avg * (T_STEAM - t_ref))
}

fn supply_duct_design(sim: &SimState, sys: &SystemSizingData, duct: DuctType) -> DesignPoint {
    let vol_flow = match duct {
        DuctType::Main | DuctType::Other => sys.des_main_vol_flow,
        DuctType::Cooling => sys.des_cool_vol_flow,
        DuctType::Heating => sys.des_heat_vol_flow,
    };
    let rho = sim.psych.rho_air_from_pb_tdb_w(
        sim.ctx.env.baro_press_pa(),
        sys.mix_temp_at_cool_peak,
        sys.mix_hum_rat_at_cool_peak,
    );
    DesignPoint {
        mass_flow: vol_flow * rho,
        inlet_hum_rat: sys.mix_hum_rat_at_cool_peak.min(sys.heat_mix_hum_rat),
        outlet_hum_rat: sys.cool_sup_hum_rat.max(sys.heat_sup_hum_rat),
    }
}

impl Humidifier {
    fn sizing_run_required(&self, run: &'static str) -> ComponentError {
        ComponentError::SizingRunRequired {
            routine: ROUTINE,
            object_type: self.object_type(),
            name: self.name.clone(),
            run,
        }
    }

    /// Design point for the active sizing target, or `None` when the capacity
    /// is hard-sized and no design data apply.
    fn design_point(&self, sim: &SimState, autosize: bool) -> ComponentResult<Option<DesignPoint>> {
        let sz = &sim.sizing;
        match sz.target {
            SizingTarget::Zone(idx) => {
                if !autosize && !sz.zone_sizing_run_done {
                    return Ok(None);
                }
                if !sz.zone_sizing_run_done {
                    return Err(self.sizing_run_required("zone"));
                }
                let z = sz.zone_data(idx).ok_or_else(|| ComponentError::Invariant {
                    what: format!("no zone sizing data at index {idx} for {}", self.name),
                })?;
                Ok(Some(DesignPoint {
                    mass_flow: z.des_cool_vol_flow.max(z.des_heat_vol_flow) * z.des_cool_dens,
                    inlet_hum_rat: z.out_hum_rat_at_heat_peak.min(z.out_hum_rat_at_cool_peak),
                    outlet_hum_rat: z.zone_hum_rat_at_heat_peak.max(z.zone_hum_rat_at_cool_peak),
                }))
            }
            SizingTarget::AirLoop {
                system,
                outdoor_air,
                duct,
            } => {
                if !autosize && !sz.sys_sizing_run_done {
                    return Ok(None);
                }
                if !sz.sys_sizing_run_done {
                    return Err(self.sizing_run_required("system"));
                }
                let sys = sz.system_data(system).ok_or_else(|| ComponentError::Invariant {
                    what: format!("no system sizing data at index {system} for {}", self.name),
                })?;
                if outdoor_air && sys.des_out_air_vol_flow > 0.0 {
                    let env = &sim.ctx.env;
                    let rho = sim.psych.rho_air_from_pb_tdb_w(
                        env.baro_press_pa(),
                        env.outdoor_dry_bulb_c(),
                        env.outdoor_hum_rat,
                    );
                    Ok(Some(DesignPoint {
                        mass_flow: sys.des_out_air_vol_flow * rho,
                        inlet_hum_rat: sys.out_hum_rat_at_cool_peak.min(sys.heat_out_hum_rat),
                        outlet_hum_rat: sys.cool_sup_hum_rat.max(sys.heat_sup_hum_rat),
                    }))
                } else {
                    Ok(Some(supply_duct_design(sim, sys, duct)))
                }
            }
            SizingTarget::None => {
                if autosize {
                    Err(self.sizing_run_required("zone or system"))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Size nominal capacity and rated power. Runs once per unit.
    pub fn size(&mut self, sim: &mut SimState) -> ComponentResult<()> {
        let object_type = self.object_type();
        let cap_autosize = is_autosize(self.nom_cap_vol);
        let rho_water = sim.psych.rho_water(INIT_CONV_TEMP_C);

        match self.design_point(sim, cap_autosize)? {
            None => {
                if self.nom_cap_vol > 0.0 {
                    sim.sizing
                        .report_sizer_output(object_type, &self.name, DESC_CAP_USER, self.nom_cap_vol);
                }
            }
            Some(dp) => {
                let des = (dp.mass_flow * (dp.outlet_hum_rat - dp.inlet_hum_rat) / rho_water).max(0.0);
                if cap_autosize {
                    self.nom_cap_vol = des;
                    sim.sizing
                        .report_sizer_output(object_type, &self.name, DESC_CAP_DES, des);
                } else if self.nom_cap_vol > 0.0 {
                    let user = self.nom_cap_vol;
                    sim.sizing
                        .report_sizer_output(object_type, &self.name, DESC_CAP_DES, des);
                    sim.sizing
                        .report_sizer_output(object_type, &self.name, DESC_CAP_USER, user);
                    if sim.ctx.flags.display_extra_warnings
                        && relative_difference(des, user, user) > sim.sizing.autosize_threshold
                    {
                        sim.diagnostics
                            .message(format!(
                                "SizeHumidifier: Potential issue with equipment sizing for {object_type} = \"{}\".",
                                self.name
                            ))
                            .cont(format!(
                                "User-Specified Nominal Capacity Volume of {} [m3/s]",
                                round_sig_digits(user, 2)
                            ))
                            .cont(format!(
                                "differs from Design Size Nominal Capacity Volume of {} [m3/s]",
                                round_sig_digits(des, 2)
                            ))
                            .cont("This may, or may not, indicate mismatched component sizes.")
                            .cont("Verify that the value entered is intended and is consistent with other components.");
                    }
                }
            }
        }

        self.nom_cap = rho_water * self.nom_cap_vol;
        let mut nominal_power = self.nom_cap * steam_energy_per_kg(sim, T_REF)?;
        let mut power_autosize = cap_autosize || is_autosize(self.nom_power);

        if let HumidifierKind::GasSteam(gas) = &mut self.kind {
            if !power_autosize {
                if self.nom_power >= nominal_power {
                    gas.thermal_eff_rated = nominal_power / self.nom_power;
                } else {
                    sim.diagnostics
                        .message(format!(
                            "{ROUTINE}: capacity and thermal efficiency mismatch for {object_type} =\"{}\".",
                            self.name
                        ))
                        .cont(format!(
                            "User-Specified Rated Gas Use Rate of {} [W]",
                            round_sig_digits(self.nom_power, 2)
                        ))
                        .cont(format!(
                            "User-Specified or Autosized Rated Capacity of {} [m3/s]",
                            round_sig_digits(self.nom_cap_vol, 2)
                        ))
                        .cont(format!(
                            "Rated Gas Use Rate at the Rated Capacity of {} [m3/s] must be greater than the ideal, i.e., 100% thermal efficiency gas use rate of {} [W]",
                            round_sig_digits(self.nom_cap_vol, 2),
                            round_sig_digits(nominal_power, 2)
                        ))
                        .cont("Resize the Rated Gas Use Rate by dividing the ideal gas use rate with expected thermal efficiency. ");
                    gas.thermal_eff_rated = 1.0;
                }
            } else if gas.thermal_eff_rated > 0.0 {
                nominal_power /= gas.thermal_eff_rated;
            }
            // Gas units always carry the computed rated power.
            power_autosize = true;
        }

        if power_autosize {
            self.nom_power = nominal_power;
            sim.sizing
                .report_sizer_output(object_type, &self.name, DESC_POWER_DES, nominal_power);
        } else if self.nom_power >= 0.0 && self.nom_cap > 0.0 {
            let user = self.nom_power;
            sim.sizing
                .report_sizer_output(object_type, &self.name, DESC_POWER_DES, nominal_power);
            sim.sizing
                .report_sizer_output(object_type, &self.name, DESC_POWER_USER, user);
            if sim.ctx.flags.display_extra_warnings
                && relative_difference(nominal_power, user, user) > sim.sizing.autosize_threshold
            {
                sim.diagnostics
                    .message(format!(
                        "SizeHumidifier: Potential issue with equipment sizing for {object_type} =\"{}\".",
                        self.name
                    ))
                    .cont(format!("User-Specified Rated Power of {} [W]", round_sig_digits(user, 2)))
                    .cont(format!(
                        "differs from Design Size Rated Power of {} [W]",
                        round_sig_digits(nominal_power, 2)
                    ))
                    .cont("This may, or may not, indicate mismatched component sizes.")
                    .cont("Verify that the value entered is intended and is consistent with other components.");
            }
            if user < nominal_power {
                sim.diagnostics
                    .warning(format!(
                        "{object_type}: specified Rated Power is less than nominal Rated Power for {} steam humidifier = {}. ",
                        self.kind.fuel_word(),
                        self.name
                    ))
                    .cont(format!(" specified Rated Power = {}", round_sig_digits(user, 2)))
                    .cont(format!(
                        " while expecting a minimum Rated Power = {}",
                        round_sig_digits(nominal_power, 2)
                    ));
            }
        } else {
            sim.diagnostics
                .warning(format!(
                    "{object_type}: specified nominal capacity is zero for {} steam humidifier = {}. ",
                    self.kind.fuel_word(),
                    self.name
                ))
                .cont(" For zero nominal capacity humidifier the rated power is zero.");
        }

        tracing::info!(
            name = %self.name,
            nom_cap_vol = self.nom_cap_vol,
            nom_cap = self.nom_cap,
            nom_power = self.nom_power,
            "humidifier sized"
        );
        Ok(())
    }
}
