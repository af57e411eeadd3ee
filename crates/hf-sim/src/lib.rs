//! Simulation context shared by hvacflow equipment models.
//!
//! Provides:
//! - `SimContext`: environment, system timestep and phase flags
//! - `SizingState`: design-day peaks by zone and air loop, the active sizing
//!   target and the sizing log
//! - `WaterStorage`: storage tanks with demand and supply slots
//! - `Diagnostics`: severe/warning/message records with continuation lines
//! - `OutputRegistry`: named report variables with units and meter tags
//! - `SimState`: everything above plus the node network, schedules, curves
//!   and property backends, bundled for the equipment call path

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod sizing;
pub mod state;
pub mod water;

// Re-exports for public API
pub use context::{Environment, SimContext, SimFlags};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{SimError, SimResult};
pub use output::{MeterResource, OutputHandle, OutputRegistry, OutputVariable, StoreType};
pub use sizing::{
    AUTOSIZE, DuctType, SizingRecord, SizingState, SizingTarget, SystemSizingData, ZoneSizingData,
    is_autosize,
};
pub use state::SimState;
pub use water::{TankDemand, TankSupply, WaterStorage, WaterTank};
