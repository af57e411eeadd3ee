//! Availability schedules.

use std::collections::HashMap;

use hf_core::ScheduleId;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Reference to a schedule held by an equipment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleRef {
    /// Constant 1.0; used when no schedule is named.
    #[default]
    AlwaysOn,
    Index(ScheduleId),
}

/// Shape of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScheduleKind {
    Constant { value: f64 },
    /// One value per hour of the day, starting at midnight.
    Hourly { values: Vec<f64> },
}

impl ScheduleKind {
    fn validate(&self) -> ControlResult<()> {
        let values: &[f64] = match self {
            ScheduleKind::Constant { value } => std::slice::from_ref(value),
            ScheduleKind::Hourly { values } => {
                if values.len() != 24 {
                    return Err(ControlError::InvalidArg {
                        what: "hourly schedule needs 24 values",
                    });
                }
                values
            }
        };
        if values.iter().any(|v| !v.is_finite() || *v < 0.0 || *v > 1.0) {
            return Err(ControlError::InvalidArg {
                what: "schedule values must lie in [0, 1]",
            });
        }
        Ok(())
    }

    fn value_at(&self, hour: usize) -> f64 {
        match self {
            ScheduleKind::Constant { value } => *value,
            ScheduleKind::Hourly { values } => values.get(hour % 24).copied().unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub name: String,
    pub kind: ScheduleKind,
}

/// Store of named schedules plus the current clock hour.
#[derive(Debug, Default, Clone)]
pub struct ScheduleManager {
    schedules: Vec<Schedule>,
    by_name: HashMap<String, ScheduleId>,
    hour: usize,
}

impl ScheduleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, kind: ScheduleKind) -> ControlResult<ScheduleId> {
        let name = name.into();
        let key = name.to_uppercase();
        if self.by_name.contains_key(&key) {
            return Err(ControlError::Duplicate { name });
        }
        kind.validate()?;
        let id = ScheduleId::from_usize(self.schedules.len());
        self.schedules.push(Schedule { name, kind });
        self.by_name.insert(key, id);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<ScheduleId> {
        self.by_name.get(&name.to_uppercase()).copied()
    }

    /// Resolve an optional schedule name. Blank or missing means always on.
    pub fn resolve(&self, name: Option<&str>) -> ControlResult<ScheduleRef> {
        match name.map(str::trim) {
            None | Some("") => Ok(ScheduleRef::AlwaysOn),
            Some(n) => self
                .find(n)
                .map(ScheduleRef::Index)
                .ok_or_else(|| ControlError::InvalidReference {
                    what: format!("schedule \"{n}\""),
                }),
        }
    }

    /// Set the hour of day used by [`ScheduleManager::current_value`].
    pub fn set_hour(&mut self, hour: usize) {
        self.hour = hour % 24;
    }

    pub fn hour(&self) -> usize {
        self.hour
    }

    /// Current fraction for a schedule reference.
    pub fn current_value(&self, sched: ScheduleRef) -> f64 {
        match sched {
            ScheduleRef::AlwaysOn => 1.0,
            ScheduleRef::Index(id) => self
                .schedules
                .get(id.slot())
                .map_or(0.0, |s| s.kind.value_at(self.hour)),
        }
    }

    pub fn schedule(&self, id: ScheduleId) -> Option<&Schedule> {
        self.schedules.get(id.slot())
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
