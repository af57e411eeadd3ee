//! Water storage tanks.
//!
//! Components that draw water register a demand slot; components that need
//! the delivered water temperature register a supply slot. Each timestep a
//! component writes its requested volume rate into its demand slot and reads
//! back what the tank made available. [`WaterStorage::update`] draws the
//! granted water and recomputes availability for the next timestep.

use std::collections::HashMap;

use hf_core::TankId;

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, PartialEq)]
pub struct TankDemand {
    pub object_type: String,
    pub object_name: String,
    /// Requested volume flow [m3/s].
    pub request: f64,
    /// Volume flow the tank can deliver [m3/s].
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TankSupply {
    pub object_type: String,
    pub object_name: String,
    /// Water delivered into the tank [m3/s].
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterTank {
    pub name: String,
    /// Maximum volume [m3].
    pub capacity: f64,
    /// Current volume [m3].
    pub volume: f64,
    /// Temperature of water leaving the tank [°C].
    pub water_temp: f64,
    pub demands: Vec<TankDemand>,
    pub supplies: Vec<TankSupply>,
}

#[derive(Debug, Default, Clone)]
pub struct WaterStorage {
    tanks: Vec<WaterTank>,
    by_name: HashMap<String, TankId>,
}

impl WaterStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tank(
        &mut self,
        name: impl Into<String>,
        capacity: f64,
        initial_volume: f64,
        water_temp: f64,
    ) -> SimResult<TankId> {
        let name = name.into();
        if capacity.is_nan() || capacity <= 0.0 || initial_volume < 0.0 || initial_volume > capacity {
            return Err(SimError::InvalidArg {
                what: "tank volume must lie in [0, capacity] with capacity > 0",
            });
        }
        let key = name.to_uppercase();
        if self.by_name.contains_key(&key) {
            return Err(SimError::InvalidReference {
                what: format!("duplicate water tank \"{name}\""),
            });
        }
        let id = TankId::from_usize(self.tanks.len());
        self.tanks.push(WaterTank {
            name,
            capacity,
            volume: initial_volume,
            water_temp,
            demands: Vec::new(),
            supplies: Vec::new(),
        });
        self.by_name.insert(key, id);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<TankId> {
        self.by_name.get(&name.trim().to_uppercase()).copied()
    }

    pub fn tank(&self, id: TankId) -> SimResult<&WaterTank> {
        self.tanks.get(id.slot()).ok_or_else(|| SimError::InvalidReference {
            what: format!("water tank {id}"),
        })
    }

    fn tank_mut(&mut self, id: TankId) -> SimResult<&mut WaterTank> {
        self.tanks
            .get_mut(id.slot())
            .ok_or_else(|| SimError::InvalidReference {
                what: format!("water tank {id}"),
            })
    }

    fn lookup(&self, tank_name: &str) -> SimResult<TankId> {
        self.find(tank_name).ok_or_else(|| SimError::InvalidReference {
            what: format!("water tank \"{tank_name}\""),
        })
    }

    /// Register a component drawing from a tank. Returns the tank and slot.
    ///
    /// A component registered again gets its old slot back with the request
    /// cleared.
    pub fn setup_demand_component(
        &mut self,
        tank_name: &str,
        object_type: &str,
        object_name: &str,
    ) -> SimResult<(TankId, usize)> {
        let id = self.lookup(tank_name)?;
        let tank = self.tank_mut(id)?;
        if let Some(slot) = tank
            .demands
            .iter()
            .position(|d| same_object(&d.object_type, &d.object_name, object_type, object_name))
        {
            tank.demands[slot].request = 0.0;
            return Ok((id, slot));
        }
        tank.demands.push(TankDemand {
            object_type: object_type.to_string(),
            object_name: object_name.to_string(),
            request: 0.0,
            available: 0.0,
        });
        Ok((id, tank.demands.len() - 1))
    }

    /// Register a component attached to a tank's supply side.
    pub fn setup_supply_component(
        &mut self,
        tank_name: &str,
        object_type: &str,
        object_name: &str,
    ) -> SimResult<(TankId, usize)> {
        let id = self.lookup(tank_name)?;
        let tank = self.tank_mut(id)?;
        if let Some(slot) = tank
            .supplies
            .iter()
            .position(|s| same_object(&s.object_type, &s.object_name, object_type, object_name))
        {
            tank.supplies[slot].rate = 0.0;
            return Ok((id, slot));
        }
        tank.supplies.push(TankSupply {
            object_type: object_type.to_string(),
            object_name: object_name.to_string(),
            rate: 0.0,
        });
        Ok((id, tank.supplies.len() - 1))
    }

    pub fn request_demand(&mut self, id: TankId, slot: usize, rate: f64) -> SimResult<()> {
        let demand = self
            .tank_mut(id)?
            .demands
            .get_mut(slot)
            .ok_or(SimError::InvalidArg {
                what: "tank demand slot",
            })?;
        demand.request = rate.max(0.0);
        Ok(())
    }

    pub fn available_demand(&self, id: TankId, slot: usize) -> SimResult<f64> {
        self.tank(id)?
            .demands
            .get(slot)
            .map(|d| d.available)
            .ok_or(SimError::InvalidArg {
                what: "tank demand slot",
            })
    }

    pub fn set_supply_rate(&mut self, id: TankId, slot: usize, rate: f64) -> SimResult<()> {
        let supply = self
            .tank_mut(id)?
            .supplies
            .get_mut(slot)
            .ok_or(SimError::InvalidArg {
                what: "tank supply slot",
            })?;
        supply.rate = rate.max(0.0);
        Ok(())
    }

    /// Temperature of water delivered through a supply slot [°C].
    pub fn supply_temperature(&self, id: TankId, slot: usize) -> SimResult<f64> {
        let tank = self.tank(id)?;
        if slot >= tank.supplies.len() {
            return Err(SimError::InvalidArg {
                what: "tank supply slot",
            });
        }
        Ok(tank.water_temp)
    }

    /// Spread the current volume over the demand slots for a timestep of
    /// `dt` seconds, without drawing anything.
    pub fn initialize_availability(&mut self, dt: f64) {
        for tank in &mut self.tanks {
            tank.allocate(dt);
        }
    }

    /// Draw granted requests for a timestep of `dt` seconds, add supplied
    /// water, and recompute availability for the next timestep.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        for tank in &mut self.tanks {
            let requested: f64 = tank.demands.iter().map(|d| d.request).sum();
            let scale = if requested * dt > tank.volume && requested > 0.0 {
                tank.volume / (requested * dt)
            } else {
                1.0
            };
            let drawn = requested * scale * dt;
            let supplied: f64 = tank.supplies.iter().map(|s| s.rate).sum::<f64>() * dt;
            tank.volume = (tank.volume - drawn + supplied).clamp(0.0, tank.capacity);
            tracing::debug!(
                tank = %tank.name,
                drawn,
                supplied,
                volume = tank.volume,
                "water tank updated"
            );
            tank.allocate(dt);
        }
    }

    pub fn tanks(&self) -> &[WaterTank] {
        &self.tanks
    }

    pub fn len(&self) -> usize {
        self.tanks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tanks.is_empty()
    }
}

fn same_object(type_a: &str, name_a: &str, type_b: &str, name_b: &str) -> bool {
    type_a.eq_ignore_ascii_case(type_b) && name_a.eq_ignore_ascii_case(name_b)
}

impl WaterTank {
    /// Share `volume / dt` among demand slots in proportion to their last
    /// requests, or evenly when nothing was requested.
    fn allocate(&mut self, dt: f64) {
        if dt <= 0.0 || self.demands.is_empty() {
            return;
        }
        let max_rate = self.volume / dt;
        let requested: f64 = self.demands.iter().map(|d| d.request).sum();
        let n = self.demands.len() as f64;
        for d in &mut self.demands {
            d.available = if requested > 0.0 {
                max_rate * d.request / requested
            } else {
                max_rate / n
            };
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn volume_stays_within_capacity(
            v0 in 0.0_f64..1.0,
            req in 0.0_f64..0.01,
            sup in 0.0_f64..0.01,
            dt in 1.0_f64..3600.0,
        ) {
            let mut ws = WaterStorage::new();
            let id = ws.add_tank("T", 1.0, v0, 10.0).unwrap();
            let (_, d) = ws.setup_demand_component("T", "X", "A").unwrap();
            let (_, s) = ws.setup_supply_component("T", "X", "A").unwrap();
            ws.request_demand(id, d, req).unwrap();
            ws.set_supply_rate(id, s, sup).unwrap();
            ws.update(dt);
            let v = ws.tank(id).unwrap().volume;
            prop_assert!((0.0..=1.0).contains(&v));
            prop_assert!(ws.available_demand(id, d).unwrap() >= 0.0);
        }
    }
}
