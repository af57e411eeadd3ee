//! Schedules and performance curves for hvacflow.
//!
//! This crate provides the two small lookup services equipment models consult
//! every timestep:
//! - **Schedules**: availability fractions in `[0, 1]`, evaluated at the current
//!   hour of day. `ScheduleRef::AlwaysOn` stands for a schedule that is 1.0
//!   everywhere and needs no storage.
//! - **Curves**: polynomial performance modifiers with input and output limits.
//!   Callers declare how many independent variables they expect and the lookup
//!   rejects curves of the wrong dimension.
//!
//! Both stores resolve names case-insensitively and hand out compact ids from
//! `hf-core`.

pub mod curve;
pub mod error;
pub mod schedule;

pub use curve::{Curve, CurveForm, CurveManager};
pub use error::{ControlError, ControlResult};
pub use schedule::{Schedule, ScheduleKind, ScheduleManager, ScheduleRef};
