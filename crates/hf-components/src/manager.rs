//! Registry of loaded humidifiers and the per-call dispatcher.

use hf_core::{EquipId, NodeId};
use hf_sim::SimState;

use crate::error::{ComponentError, ComponentResult};
use crate::humidifier::{GasSteam, Humidifier, HumidifierInput, HumidifierKind, load_humidifiers};

/// Owns every humidifier in the model.
///
/// Input is read on the first call that needs it. [`HumidifierManager::reset`]
/// releases the loaded units so the next call reads input again.
pub struct HumidifierManager {
    source: Box<dyn HumidifierInput + Send + Sync>,
    units: Vec<Humidifier>,
    loaded: bool,
}

impl std::fmt::Debug for HumidifierManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumidifierManager")
            .field("units", &self.units.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}

impl HumidifierManager {
    pub fn new(source: impl HumidifierInput + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
            units: Vec::new(),
            loaded: false,
        }
    }

    /// Load input once. Later calls do nothing.
    pub fn get_input(&mut self, sim: &mut SimState) -> ComponentResult<()> {
        if self.loaded {
            return Ok(());
        }
        self.units = load_humidifiers(self.source.as_ref(), sim)?;
        self.loaded = true;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Drop the loaded units and zero their tank requests and supply rates.
    ///
    /// Node connections, tank slots and report variables are keyed by object
    /// name, so the next load reuses them instead of registering copies.
    pub fn reset(&mut self, sim: &mut SimState) -> ComponentResult<()> {
        for unit in &self.units {
            if let Some(link) = unit.water_tank {
                sim.tanks.request_demand(link.tank, link.demand_slot, 0.0)?;
                if let HumidifierKind::GasSteam(GasSteam {
                    tank_supply_slot: Some(slot),
                    ..
                }) = unit.kind
                {
                    sim.tanks.set_supply_rate(link.tank, slot, 0.0)?;
                }
            }
        }
        self.units.clear();
        self.loaded = false;
        Ok(())
    }

    pub fn units(&self) -> &[Humidifier] {
        &self.units
    }

    pub fn unit(&self, id: EquipId) -> Option<&Humidifier> {
        self.units.get(id.slot())
    }

    /// Handle of the unit with exactly this name.
    pub fn find(&self, name: &str) -> Option<EquipId> {
        self.units
            .iter()
            .position(|u| u.name == name)
            .map(EquipId::from_usize)
    }

    /// Simulate one humidifier.
    ///
    /// When `index` is `None` the unit is found by name and the handle is
    /// written back for later calls. A provided handle is checked against
    /// `name` on its first use only.
    pub fn simulate(
        &mut self,
        sim: &mut SimState,
        name: &str,
        first_hvac_iteration: bool,
        index: &mut Option<EquipId>,
    ) -> ComponentResult<()> {
        self.get_input(sim)?;

        let id = match *index {
            None => {
                let Some(id) = self.find(name) else {
                    return Err(fatal(
                        sim,
                        ComponentError::UnitNotFound {
                            name: name.to_string(),
                        },
                    ));
                };
                *index = Some(id);
                id
            }
            Some(id) => {
                let count = self.units.len();
                let Some(unit) = self.units.get_mut(id.slot()) else {
                    return Err(fatal(
                        sim,
                        ComponentError::InvalidIndex {
                            index: id.ordinal(),
                            count,
                            name: name.to_string(),
                            stored: None,
                        },
                    ));
                };
                if unit.flags.check_equip_name {
                    if unit.name != name {
                        let stored = Some(unit.name.clone());
                        return Err(fatal(
                            sim,
                            ComponentError::InvalidIndex {
                                index: id.ordinal(),
                                count,
                                name: name.to_string(),
                                stored,
                            },
                        ));
                    }
                    unit.flags.check_equip_name = false;
                }
                id
            }
        };

        tracing::debug!(name, first_hvac_iteration, "simulate humidifier");
        match self.units.get_mut(id.slot()) {
            Some(unit) => unit.simulate(sim),
            None => Err(ComponentError::Invariant {
                what: format!("humidifier handle {id} out of range"),
            }),
        }
    }

    /// Air inlet node of the named unit.
    pub fn air_inlet_node(&mut self, sim: &mut SimState, name: &str) -> ComponentResult<NodeId> {
        self.node_of(sim, name, "GetAirInletNodeNum", |u| u.air_in_node)
    }

    /// Air outlet node of the named unit.
    pub fn air_outlet_node(&mut self, sim: &mut SimState, name: &str) -> ComponentResult<NodeId> {
        self.node_of(sim, name, "GetAirOutletNodeNum", |u| u.air_out_node)
    }

    fn node_of(
        &mut self,
        sim: &mut SimState,
        name: &str,
        routine: &str,
        pick: fn(&Humidifier) -> NodeId,
    ) -> ComponentResult<NodeId> {
        self.get_input(sim)?;
        match self.find(name).and_then(|id| self.unit(id)) {
            Some(unit) => Ok(pick(unit)),
            None => {
                sim.diagnostics
                    .severe(format!("{routine}: Could not find Humidifier = \"{name}\""));
                Err(ComponentError::UnitNotFound {
                    name: name.to_string(),
                })
            }
        }
    }
}

fn fatal(sim: &mut SimState, err: ComponentError) -> ComponentError {
    sim.diagnostics.fatal(err.to_string());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humidifier::HumidifierObject;
    use hf_sim::Severity;

    fn manager() -> HumidifierManager {
        HumidifierManager::new(vec![
            HumidifierObject::electric("E1", "In1", "Out1").with_capacity(1e-6),
            HumidifierObject::electric("E2", "In2", "Out2").with_capacity(1e-6),
        ])
    }

    #[test]
    fn load_is_idempotent() {
        let mut sim = SimState::new();
        let mut mgr = manager();
        mgr.get_input(&mut sim).unwrap();
        let first = mgr.units().to_vec();
        let outputs = sim.outputs.len();
        mgr.get_input(&mut sim).unwrap();
        assert_eq!(mgr.units(), first.as_slice());
        assert_eq!(sim.outputs.len(), outputs);
    }

    #[test]
    fn lookup_is_exact() {
        let mut sim = SimState::new();
        let mut mgr = manager();
        mgr.get_input(&mut sim).unwrap();
        assert_eq!(mgr.find("E2"), Some(EquipId::from_usize(1)));
        assert_eq!(mgr.find("e2"), None);
    }

    #[test]
    fn node_lookup_helpers() {
        let mut sim = SimState::new();
        let mut mgr = manager();
        let inlet = mgr.air_inlet_node(&mut sim, "E2").unwrap();
        assert_eq!(sim.nodes.node_name(inlet), "In2");
        let outlet = mgr.air_outlet_node(&mut sim, "E1").unwrap();
        assert_eq!(sim.nodes.node_name(outlet), "Out1");

        let err = mgr.air_inlet_node(&mut sim, "Nope").unwrap_err();
        assert_eq!(err, ComponentError::UnitNotFound { name: "Nope".into() });
        assert!(sim
            .diagnostics
            .find(Severity::Severe, "GetAirInletNodeNum: Could not find Humidifier = \"Nope\"")
            .next()
            .is_some());
    }

    #[test]
    fn reset_allows_reload() {
        let mut sim = SimState::new();
        let mut mgr = manager();
        mgr.get_input(&mut sim).unwrap();
        mgr.reset(&mut sim).unwrap();
        assert!(!mgr.is_loaded());
        assert!(mgr.units().is_empty());
    }

    #[test]
    fn reload_after_reset_reuses_registrations() {
        let mut sim = SimState::new();
        let tank = sim.tanks.add_tank("T", 1.0, 0.5, 15.0).unwrap();
        let mut mgr = HumidifierManager::new(vec![HumidifierObject::electric("E1", "In1", "Out1")
            .with_capacity(1e-6)
            .with_water_tank("T")]);
        mgr.get_input(&mut sim).unwrap();
        let outputs = sim.outputs.len();
        let connections = sim.nodes.connections().len();
        let link = mgr.units()[0].water_tank.unwrap();
        sim.tanks.request_demand(tank, link.demand_slot, 1e-6).unwrap();

        mgr.reset(&mut sim).unwrap();
        assert_eq!(sim.tanks.tank(tank).unwrap().demands[0].request, 0.0);

        mgr.get_input(&mut sim).unwrap();
        assert_eq!(sim.outputs.len(), outputs);
        assert_eq!(sim.nodes.connections().len(), connections);
        assert_eq!(sim.nodes.comp_sets().len(), 1);
        let demands = &sim.tanks.tank(tank).unwrap().demands;
        assert_eq!(demands.len(), 1);
        assert_eq!(mgr.units()[0].water_tank, Some(link));
    }
}
