//! hf-fluids: moist-air and water property calculations for hvacflow.
//!
//! Provides:
//! - `Psychrometrics` trait for moist-air relations (saturation humidity ratio,
//!   enthalpy and its inverse, air and water density)
//! - `AshraePsychrometrics`, the correlation set used by building energy codes
//! - `WaterProperties` trait for saturated steam/water enthalpy and liquid
//!   specific heat
//! - `If97Water` backend (IAPWS-IF97 via `seuif97`)
//! - `CoolPropWater` backend (via `rfluids`, behind the `coolprop` feature)
//!
//! # Architecture
//!
//! Component models only ever see the two traits, so the backend can be swapped
//! per simulation without touching equipment code. Temperatures are in °C,
//! pressures in Pa and humidity ratios in kg water / kg dry air, the units the
//! HVAC node network stores.
//!
//! # Example
//!
//! ```
//! use hf_fluids::{AshraePsychrometrics, Psychrometrics};
//!
//! let psy = AshraePsychrometrics::new();
//! let w_sat = psy.hum_rat_from_tdb_rh_pb(20.0, 1.0, 101_325.0);
//! assert!(w_sat > 0.014 && w_sat < 0.015);
//! ```

#[cfg(feature = "coolprop")]
pub mod coolprop;
pub mod error;
pub mod psychrometrics;
pub mod water;

// Re-exports for ergonomics
#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropWater;
pub use error::{FluidError, FluidResult};
pub use psychrometrics::{AshraePsychrometrics, Psychrometrics};
pub use water::{If97Water, WaterProperties};
