//! Humidifier data model.

use hf_controls::ScheduleRef;
use hf_core::{CurveId, NodeId, TankId};
use hf_sim::OutputHandle;

use super::report::ReportField;

pub const ELECTRIC_STEAM_TYPE: &str = "Humidifier:Steam:Electric";
pub const GAS_STEAM_TYPE: &str = "Humidifier:Steam:Gas";

/// Air state copied from or written to a node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirState {
    /// Dry-bulb temperature [°C].
    pub temp: f64,
    /// Humidity ratio [kg/kg].
    pub hum_rat: f64,
    /// Enthalpy [J/kg].
    pub enthalpy: f64,
    /// Mass flow rate [kg/s].
    pub mass_flow_rate: f64,
}

/// Where a gas-fired unit takes its makeup-water temperature from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InletWaterTemp {
    /// Gas use scales with the rated gas use rate.
    #[default]
    Fixed,
    /// Gas use follows an energy balance on the current makeup-water temperature.
    Variable,
}

impl InletWaterTemp {
    /// Parse an input keyword. Blank or unrecognised input falls back to
    /// [`InletWaterTemp::Fixed`].
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(str::trim) {
            Some("VariableInletWaterTemperature") => InletWaterTemp::Variable,
            _ => InletWaterTemp::Fixed,
        }
    }
}

/// Electric steam humidifier consumption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElectricSteam {
    /// [W]
    pub elec_use_rate: f64,
    /// [J]
    pub elec_use_energy: f64,
}

/// Gas-fired steam humidifier configuration and consumption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GasSteam {
    /// Rated thermal efficiency, (0, 1].
    pub thermal_eff_rated: f64,
    /// Part-load modifier of the thermal efficiency.
    pub efficiency_curve: Option<CurveId>,
    pub inlet_water_temp: InletWaterTemp,
    /// Supply slot on the linked tank, used for the makeup-water temperature.
    pub tank_supply_slot: Option<usize>,
    /// Thermal efficiency achieved this call.
    pub thermal_eff: f64,
    /// [W]
    pub gas_use_rate: f64,
    /// [J]
    pub gas_use_energy: f64,
    /// [W]
    pub aux_elec_use_rate: f64,
    /// [J]
    pub aux_elec_use_energy: f64,
    /// Makeup-water temperature used in the last variable-temperature call [°C].
    pub cur_makeup_water_temp: f64,
}

/// Equipment kind with the fields only that kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum HumidifierKind {
    ElectricSteam(ElectricSteam),
    GasSteam(GasSteam),
}

impl HumidifierKind {
    pub fn object_type(&self) -> &'static str {
        match self {
            HumidifierKind::ElectricSteam(_) => ELECTRIC_STEAM_TYPE,
            HumidifierKind::GasSteam(_) => GAS_STEAM_TYPE,
        }
    }

    /// Word used in sizing warnings.
    pub(crate) fn fuel_word(&self) -> &'static str {
        match self {
            HumidifierKind::ElectricSteam(_) => "electric",
            HumidifierKind::GasSteam(_) => "gas",
        }
    }
}

/// Link to a storage tank the unit draws water from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TankLink {
    pub tank: TankId,
    pub demand_slot: usize,
}

/// Water drawn this call, split between tank and starved supply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaterUse {
    /// Water consumption [m3/s].
    pub cons_rate: f64,
    /// Water consumed this call [m3].
    pub cons: f64,
    /// [m3/s]
    pub tank_supply_vdot: f64,
    /// [m3]
    pub tank_supply_vol: f64,
    /// [m3/s]
    pub starved_supply_vdot: f64,
    /// [m3]
    pub starved_supply_vol: f64,
}

/// One-shot flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OnceFlags {
    pub size: bool,
    pub setpoint_check: bool,
    pub envrn: bool,
    pub check_equip_name: bool,
}

impl Default for OnceFlags {
    fn default() -> Self {
        Self {
            size: true,
            setpoint_check: true,
            envrn: true,
            check_equip_name: true,
        }
    }
}

/// One configured steam humidifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Humidifier {
    pub name: String,
    pub kind: HumidifierKind,
    pub schedule: ScheduleRef,
    /// Nominal capacity [m3/s of water]; may hold the autosize sentinel
    /// until sized.
    pub nom_cap_vol: f64,
    /// Nominal capacity [kg/s], set by sizing.
    pub nom_cap: f64,
    /// Rated power [W] (rated gas use rate for gas units); may hold the
    /// autosize sentinel until sized.
    pub nom_power: f64,
    /// [W]
    pub fan_power: f64,
    /// [W]
    pub standby_power: f64,
    pub air_in_node: NodeId,
    pub air_out_node: NodeId,
    pub water_tank: Option<TankLink>,

    /// Minimum humidity-ratio setpoint read from the outlet node [kg/kg].
    pub hum_rat_set: f64,
    pub inlet: AirState,
    pub outlet: AirState,
    /// Water added to the air [kg/s].
    pub water_add: f64,
    pub water: WaterUse,

    pub(crate) flags: OnceFlags,
    pub(crate) reports: Vec<(ReportField, OutputHandle)>,
}

impl Humidifier {
    pub fn new(
        name: impl Into<String>,
        kind: HumidifierKind,
        air_in_node: NodeId,
        air_out_node: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            schedule: ScheduleRef::AlwaysOn,
            nom_cap_vol: 0.0,
            nom_cap: 0.0,
            nom_power: 0.0,
            fan_power: 0.0,
            standby_power: 0.0,
            air_in_node,
            air_out_node,
            water_tank: None,
            hum_rat_set: 0.0,
            inlet: AirState::default(),
            outlet: AirState::default(),
            water_add: 0.0,
            water: WaterUse::default(),
            flags: OnceFlags::default(),
            reports: Vec::new(),
        }
    }

    pub fn with_schedule(mut self, schedule: ScheduleRef) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_capacity(mut self, nom_cap_vol: f64) -> Self {
        self.nom_cap_vol = nom_cap_vol;
        self
    }

    pub fn with_power(mut self, nom_power: f64, fan_power: f64, standby_power: f64) -> Self {
        self.nom_power = nom_power;
        self.fan_power = fan_power;
        self.standby_power = standby_power;
        self
    }

    pub fn with_water_tank(mut self, link: TankLink) -> Self {
        self.water_tank = Some(link);
        self
    }

    pub fn object_type(&self) -> &'static str {
        self.kind.object_type()
    }

    /// Whether sizing has not run yet.
    pub fn needs_sizing(&self) -> bool {
        self.flags.size
    }

    /// Electricity drawn [W]: element power for electric units, auxiliary
    /// power for gas units.
    pub fn electric_power(&self) -> f64 {
        match &self.kind {
            HumidifierKind::ElectricSteam(e) => e.elec_use_rate,
            HumidifierKind::GasSteam(g) => g.aux_elec_use_rate,
        }
    }

    /// Electricity used this call [J].
    pub fn electric_energy(&self) -> f64 {
        match &self.kind {
            HumidifierKind::ElectricSteam(e) => e.elec_use_energy,
            HumidifierKind::GasSteam(g) => g.aux_elec_use_energy,
        }
    }

    /// Gas drawn [W]; zero for electric units.
    pub fn gas_power(&self) -> f64 {
        match &self.kind {
            HumidifierKind::ElectricSteam(_) => 0.0,
            HumidifierKind::GasSteam(g) => g.gas_use_rate,
        }
    }

    /// Gas used this call [J]; zero for electric units.
    pub fn gas_energy(&self) -> f64 {
        match &self.kind {
            HumidifierKind::ElectricSteam(_) => 0.0,
            HumidifierKind::GasSteam(g) => g.gas_use_energy,
        }
    }

    pub(crate) fn reset_rates(&mut self) {
        self.water_add = 0.0;
        self.water.cons = 0.0;
        self.water.cons_rate = 0.0;
        match &mut self.kind {
            HumidifierKind::ElectricSteam(e) => {
                e.elec_use_rate = 0.0;
                e.elec_use_energy = 0.0;
            }
            HumidifierKind::GasSteam(g) => {
                g.thermal_eff = 0.0;
                g.gas_use_rate = 0.0;
                g.gas_use_energy = 0.0;
                g.aux_elec_use_rate = 0.0;
                g.aux_elec_use_energy = 0.0;
            }
        }
    }
}
