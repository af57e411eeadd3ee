//! Steam humidifiers, electric and gas fired.

pub mod engine;
pub mod input;
pub mod mixing;
pub mod model;
pub mod report;
pub mod sizing;

pub use engine::SMALL_MASS_FLOW;
pub use input::{HumidifierInput, HumidifierInputKind, HumidifierObject, load_humidifiers};
pub use mixing::{MixOutcome, STEAM_ENTHALPY, saturation_limited_mix};
pub use model::{
    AirState, ELECTRIC_STEAM_TYPE, ElectricSteam, GAS_STEAM_TYPE, GasSteam, Humidifier,
    HumidifierKind, InletWaterTemp, TankLink, WaterUse,
};
pub use report::ReportField;
pub use sizing::{T_REF, T_STEAM, steam_energy_per_kg};
