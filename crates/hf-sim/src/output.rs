//! Report-variable registry.

use serde::{Deserialize, Serialize};

/// How a variable aggregates over a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreType {
    Average,
    Sum,
}

/// Meter tags attached to summed variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterResource {
    pub resource: String,
    pub end_use: String,
    pub group: String,
}

impl MeterResource {
    pub fn new(resource: &str, end_use: &str, group: &str) -> Self {
        Self {
            resource: resource.to_string(),
            end_use: end_use.to_string(),
            group: group.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputVariable {
    pub name: String,
    pub units: String,
    /// Object the variable belongs to.
    pub key: String,
    pub store: StoreType,
    pub meter: Option<MeterResource>,
    pub value: f64,
}

/// Handle returned at registration, used to publish values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputHandle(usize);

#[derive(Debug, Default, Clone)]
pub struct OutputRegistry {
    vars: Vec<OutputVariable>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable. Registering the same name and key again returns
    /// the existing handle with its value cleared.
    pub fn setup_output_variable(
        &mut self,
        name: &str,
        units: &str,
        key: &str,
        store: StoreType,
        meter: Option<MeterResource>,
    ) -> OutputHandle {
        if let Some(i) = self
            .vars
            .iter()
            .position(|v| v.name.eq_ignore_ascii_case(name) && v.key.eq_ignore_ascii_case(key))
        {
            let v = &mut self.vars[i];
            v.units = units.to_string();
            v.store = store;
            v.meter = meter;
            v.value = 0.0;
            return OutputHandle(i);
        }
        self.vars.push(OutputVariable {
            name: name.to_string(),
            units: units.to_string(),
            key: key.to_string(),
            store,
            meter,
            value: 0.0,
        });
        OutputHandle(self.vars.len() - 1)
    }

    pub fn set(&mut self, handle: OutputHandle, value: f64) {
        if let Some(v) = self.vars.get_mut(handle.0) {
            v.value = value;
        }
    }

    pub fn value(&self, handle: OutputHandle) -> Option<f64> {
        self.vars.get(handle.0).map(|v| v.value)
    }

    /// Look up by variable name and key, both case-insensitive.
    pub fn find(&self, name: &str, key: &str) -> Option<&OutputVariable> {
        self.vars
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name) && v.key.eq_ignore_ascii_case(key))
    }

    pub fn variables_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a OutputVariable> + 'a {
        self.vars.iter().filter(move |v| v.key.eq_ignore_ascii_case(key))
    }

    pub fn variables(&self) -> &[OutputVariable] {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
