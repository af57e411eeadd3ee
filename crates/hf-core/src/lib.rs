//! hf-core: shared foundation for the hvacflow crates.
//!
//! Contains:
//! - units: uom SI quantities, constructors and physical constants
//! - numeric: float comparison with tolerances, relative differences
//! - ids: `NonZeroU32` handles into node, schedule, curve, tank and
//!   equipment stores
//! - error: the workspace-wide `HfError`

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports
pub use error::{HfError, HfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
