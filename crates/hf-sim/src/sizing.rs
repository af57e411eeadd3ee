//! Design-day sizing data and the sizing log.

use serde::{Deserialize, Serialize};

/// Sentinel stored in autosizable fields.
pub const AUTOSIZE: f64 = -99999.0;

/// Relative difference above which hard-sized values are reported as
/// mismatching the design value.
pub const DEFAULT_AUTOSIZE_THRESHOLD: f64 = 0.1;

pub fn is_autosize(v: f64) -> bool {
    v == AUTOSIZE
}

/// Air-loop duct branch a component sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuctType {
    #[default]
    Main,
    Cooling,
    Heating,
    Other,
}

/// Zone design-day peaks. Volume flows m3/s, densities kg/m3, humidity
/// ratios kg/kg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSizingData {
    pub des_cool_vol_flow: f64,
    pub des_heat_vol_flow: f64,
    pub des_cool_dens: f64,
    pub out_hum_rat_at_heat_peak: f64,
    pub out_hum_rat_at_cool_peak: f64,
    pub zone_hum_rat_at_heat_peak: f64,
    pub zone_hum_rat_at_cool_peak: f64,
}

/// Air-loop design-day peaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSizingData {
    pub des_main_vol_flow: f64,
    pub des_cool_vol_flow: f64,
    pub des_heat_vol_flow: f64,
    pub des_out_air_vol_flow: f64,
    pub out_hum_rat_at_cool_peak: f64,
    pub heat_out_hum_rat: f64,
    /// Mixed-air temperature at the cooling peak [°C].
    pub mix_temp_at_cool_peak: f64,
    pub mix_hum_rat_at_cool_peak: f64,
    pub heat_mix_hum_rat: f64,
    pub cool_sup_hum_rat: f64,
    pub heat_sup_hum_rat: f64,
}

/// Which sizing data the component being sized draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingTarget {
    #[default]
    None,
    /// Zone equipment, indexed into the zone sizing table.
    Zone(usize),
    /// Air-loop equipment; `outdoor_air` when it sits in the outdoor-air system.
    AirLoop {
        system: usize,
        outdoor_air: bool,
        duct: DuctType,
    },
}

/// One reported sizing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRecord {
    pub component_type: String,
    pub component_name: String,
    pub description: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct SizingState {
    pub zone_sizing_run_done: bool,
    pub sys_sizing_run_done: bool,
    pub target: SizingTarget,
    pub zone: Vec<ZoneSizingData>,
    pub system: Vec<SystemSizingData>,
    pub autosize_threshold: f64,
    log: Vec<SizingRecord>,
}

impl Default for SizingState {
    fn default() -> Self {
        Self {
            zone_sizing_run_done: false,
            sys_sizing_run_done: false,
            target: SizingTarget::None,
            zone: Vec::new(),
            system: Vec::new(),
            autosize_threshold: DEFAULT_AUTOSIZE_THRESHOLD,
            log: Vec::new(),
        }
    }
}

impl SizingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone_data(&self, index: usize) -> Option<&ZoneSizingData> {
        self.zone.get(index)
    }

    pub fn system_data(&self, index: usize) -> Option<&SystemSizingData> {
        self.system.get(index)
    }

    /// Record a sized value.
    pub fn report_sizer_output(
        &mut self,
        component_type: &str,
        component_name: &str,
        description: &str,
        value: f64,
    ) {
        tracing::info!(
            component_type,
            component_name,
            description,
            value,
            "sizer output"
        );
        self.log.push(SizingRecord {
            component_type: component_type.to_string(),
            component_name: component_name.to_string(),
            description: description.to_string(),
            value,
        });
    }

    pub fn log(&self) -> &[SizingRecord] {
        &self.log
    }

    /// First record for a component with the given description.
    pub fn find_record(&self, component_name: &str, description: &str) -> Option<&SizingRecord> {
        self.log.iter().find(|r| {
            r.component_name.eq_ignore_ascii_case(component_name) && r.description == description
        })
    }
}
