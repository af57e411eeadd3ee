//! Project schema definitions.

use hf_core::units::constants::STD_BARO_PRESS_PA;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub environment: EnvironmentDef,
    #[serde(default)]
    pub timestep: TimestepDef,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub schedules: Vec<ScheduleDef>,
    #[serde(default)]
    pub curves: Vec<CurveDef>,
    #[serde(default)]
    pub water_tanks: Vec<WaterTankDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingDef>,
    #[serde(default)]
    pub humidifiers: Vec<HumidifierDef>,
    #[serde(default)]
    pub run: RunDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentDef {
    #[serde(default = "default_baro_press")]
    pub baro_press_pa: f64,
    #[serde(default = "default_outdoor_dry_bulb")]
    pub outdoor_dry_bulb_c: f64,
    #[serde(default = "default_outdoor_hum_rat")]
    pub outdoor_hum_rat: f64,
    #[serde(default = "default_water_mains_temp")]
    pub water_mains_temp_c: f64,
}

impl Default for EnvironmentDef {
    fn default() -> Self {
        Self {
            baro_press_pa: default_baro_press(),
            outdoor_dry_bulb_c: default_outdoor_dry_bulb(),
            outdoor_hum_rat: default_outdoor_hum_rat(),
            water_mains_temp_c: default_water_mains_temp(),
        }
    }
}

fn default_baro_press() -> f64 {
    STD_BARO_PRESS_PA
}

fn default_outdoor_dry_bulb() -> f64 {
    20.0
}

fn default_outdoor_hum_rat() -> f64 {
    0.008
}

fn default_water_mains_temp() -> f64 {
    10.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimestepDef {
    /// System timestep [s].
    #[serde(default = "default_system_dt")]
    pub system_s: f64,
}

impl Default for TimestepDef {
    fn default() -> Self {
        Self {
            system_s: default_system_dt(),
        }
    }
}

fn default_system_dt() -> f64 {
    900.0
}

/// Air node with optional boundary state. Nodes not listed here are created
/// when a humidifier references them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hum_rat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_flow_kgps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_pa: Option<f64>,
    /// Minimum humidity-ratio setpoint [kg/kg].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hum_rat_min_setpoint: Option<f64>,
    /// Setpoint is written by an energy management program.
    #[serde(default)]
    pub ems_setpoint: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_ppm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_contaminant: Option<f64>,
}

impl NodeDef {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            temperature_c: None,
            hum_rat: None,
            mass_flow_kgps: None,
            pressure_pa: None,
            hum_rat_min_setpoint: None,
            ems_setpoint: false,
            co2_ppm: None,
            generic_contaminant: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDef {
    pub name: String,
    pub kind: ScheduleKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ScheduleKindDef {
    Constant { value: f64 },
    /// One value per hour of the day.
    Hourly { values: Vec<f64> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveDef {
    pub name: String,
    pub form: CurveFormDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_output: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CurveFormDef {
    Linear { c0: f64, c1: f64 },
    Quadratic { c0: f64, c1: f64, c2: f64 },
    Cubic { c0: f64, c1: f64, c2: f64, c3: f64 },
    Biquadratic { c: [f64; 6] },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterTankDef {
    pub name: String,
    pub capacity_m3: f64,
    pub initial_volume_m3: f64,
    #[serde(default = "default_tank_temp")]
    pub water_temp_c: f64,
}

fn default_tank_temp() -> f64 {
    15.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SizingDef {
    #[serde(default)]
    pub zone_sizing_run_done: bool,
    #[serde(default)]
    pub sys_sizing_run_done: bool,
    #[serde(default)]
    pub target: SizingTargetDef,
    #[serde(default)]
    pub zone: Vec<ZoneSizingDef>,
    #[serde(default)]
    pub system: Vec<SystemSizingDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosize_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SizingTargetDef {
    #[default]
    None,
    Zone {
        index: usize,
    },
    AirLoop {
        system: usize,
        #[serde(default)]
        outdoor_air: bool,
        #[serde(default)]
        duct: DuctDef,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DuctDef {
    #[default]
    Main,
    Cooling,
    Heating,
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoneSizingDef {
    pub des_cool_vol_flow: f64,
    pub des_heat_vol_flow: f64,
    pub des_cool_dens: f64,
    pub out_hum_rat_at_heat_peak: f64,
    pub out_hum_rat_at_cool_peak: f64,
    pub zone_hum_rat_at_heat_peak: f64,
    pub zone_hum_rat_at_cool_peak: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemSizingDef {
    pub des_main_vol_flow: f64,
    pub des_cool_vol_flow: f64,
    pub des_heat_vol_flow: f64,
    pub des_out_air_vol_flow: f64,
    pub out_hum_rat_at_cool_peak: f64,
    pub heat_out_hum_rat: f64,
    pub mix_temp_at_cool_peak: f64,
    pub mix_hum_rat_at_cool_peak: f64,
    pub heat_mix_hum_rat: f64,
    pub cool_sup_hum_rat: f64,
    pub heat_sup_hum_rat: f64,
}

/// A number or the keyword `autosize` (any case).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "AutosizeRaw", into = "AutosizeRaw")]
pub enum Autosizable {
    Autosize,
    Value(f64),
}

impl Autosizable {
    pub fn is_autosize(self) -> bool {
        matches!(self, Autosizable::Autosize)
    }

    /// The value, or `sentinel` when autosized.
    pub fn or_sentinel(self, sentinel: f64) -> f64 {
        match self {
            Autosizable::Autosize => sentinel,
            Autosizable::Value(v) => v,
        }
    }
}

impl Default for Autosizable {
    fn default() -> Self {
        Autosizable::Value(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AutosizeRaw {
    Number(f64),
    Keyword(String),
}

impl TryFrom<AutosizeRaw> for Autosizable {
    type Error = String;

    fn try_from(raw: AutosizeRaw) -> Result<Self, Self::Error> {
        match raw {
            AutosizeRaw::Number(v) => Ok(Autosizable::Value(v)),
            AutosizeRaw::Keyword(s) if s.trim().eq_ignore_ascii_case("autosize") => {
                Ok(Autosizable::Autosize)
            }
            AutosizeRaw::Keyword(s) => Err(format!("expected a number or 'autosize', got '{s}'")),
        }
    }
}

impl From<Autosizable> for AutosizeRaw {
    fn from(v: Autosizable) -> Self {
        match v {
            Autosizable::Autosize => AutosizeRaw::Keyword("autosize".to_string()),
            Autosizable::Value(v) => AutosizeRaw::Number(v),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HumidifierDef {
    pub name: String,
    pub kind: HumidifierKindDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_schedule: Option<String>,
    pub nominal_capacity_m3ps: Autosizable,
    pub rated_power_w: Autosizable,
    #[serde(default)]
    pub fan_power_w: f64,
    #[serde(default)]
    pub standby_power_w: f64,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_storage_tank: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum HumidifierKindDef {
    ElectricSteam,
    GasSteam {
        #[serde(default = "default_thermal_efficiency")]
        thermal_efficiency: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        efficiency_curve: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inlet_water_temperature_option: Option<String>,
    },
}

fn default_thermal_efficiency() -> f64 {
    0.8
}

/// Run driver settings and global switches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Hour of day of the first step.
    #[serde(default)]
    pub start_hour: usize,
    /// Calls per humidifier per step.
    #[serde(default = "default_hvac_iterations")]
    pub hvac_iterations: usize,
    #[serde(default)]
    pub display_extra_warnings: bool,
    #[serde(default = "default_true")]
    pub do_setpoint_test: bool,
    #[serde(default)]
    pub any_ems_in_model: bool,
    #[serde(default)]
    pub co2_simulation: bool,
    #[serde(default)]
    pub generic_contam_simulation: bool,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            start_hour: 0,
            hvac_iterations: default_hvac_iterations(),
            display_extra_warnings: false,
            do_setpoint_test: true,
            any_ems_in_model: false,
            co2_simulation: false,
            generic_contam_simulation: false,
        }
    }
}

fn default_steps() -> usize {
    4
}

fn default_hvac_iterations() -> usize {
    2
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autosize_keyword_any_case() {
        let v: Autosizable = serde_yaml::from_str("AutoSize").unwrap();
        assert_eq!(v, Autosizable::Autosize);
        let v: Autosizable = serde_yaml::from_str("0.25").unwrap();
        assert_eq!(v, Autosizable::Value(0.25));
        assert!(serde_yaml::from_str::<Autosizable>("large").is_err());
        assert_eq!(serde_json::to_string(&Autosizable::Autosize).unwrap(), "\"autosize\"");
    }

    #[test]
    fn minimal_humidifier_uses_defaults() {
        let yaml = r#"
name: H1
kind:
  type: GasSteam
nominal_capacity_m3ps: autosize
rated_power_w: 1000
air_inlet_node: In
air_outlet_node: Out
"#;
        let h: HumidifierDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(h.nominal_capacity_m3ps, Autosizable::Autosize);
        assert_eq!(h.rated_power_w, Autosizable::Value(1000.0));
        assert_eq!(h.fan_power_w, 0.0);
        match h.kind {
            HumidifierKindDef::GasSteam {
                thermal_efficiency, ..
            } => assert_eq!(thermal_efficiency, 0.8),
            HumidifierKindDef::ElectricSteam => panic!("expected gas"),
        }
    }
}
