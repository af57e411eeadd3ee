//! hf-components: steam humidifier models for hvacflow.
//!
//! Provides:
//! - `Humidifier`: electric and gas-fired steam humidifiers sharing one
//!   saturation-limited mixing calculation
//! - input loading with batch diagnostics
//! - sizing of nominal capacity and rated power from design peaks
//! - `HumidifierManager`: lazy load, handle caching and per-call dispatch

pub mod error;
pub mod humidifier;
pub mod manager;

// Re-exports
pub use error::{ComponentError, ComponentResult, ErrorKind};
pub use humidifier::{
    AirState, ElectricSteam, GasSteam, Humidifier, HumidifierInput, HumidifierInputKind,
    HumidifierKind, HumidifierObject, InletWaterTemp, ReportField, TankLink, WaterUse,
};
pub use manager::HumidifierManager;
