//! Bundle of everything an equipment call touches.

use hf_controls::{CurveManager, ScheduleManager};
use hf_fluids::{AshraePsychrometrics, If97Water, Psychrometrics, WaterProperties};
use hf_graph::NodeNetwork;

use crate::context::SimContext;
use crate::diagnostics::Diagnostics;
use crate::output::OutputRegistry;
use crate::sizing::SizingState;
use crate::water::WaterStorage;

/// Shared mutable simulation state.
///
/// Equipment models receive `&mut SimState` on every call; nothing in here is
/// owned by a single component.
pub struct SimState {
    pub ctx: SimContext,
    pub nodes: NodeNetwork,
    pub schedules: ScheduleManager,
    pub curves: CurveManager,
    pub tanks: WaterStorage,
    pub sizing: SizingState,
    pub diagnostics: Diagnostics,
    pub outputs: OutputRegistry,
    pub psych: Box<dyn Psychrometrics>,
    pub water: Box<dyn WaterProperties>,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            ctx: SimContext::default(),
            nodes: NodeNetwork::default(),
            schedules: ScheduleManager::default(),
            curves: CurveManager::default(),
            tanks: WaterStorage::default(),
            sizing: SizingState::default(),
            diagnostics: Diagnostics::default(),
            outputs: OutputRegistry::default(),
            psych: Box::new(AshraePsychrometrics::new()),
            water: Box::new(If97Water::new()),
        }
    }
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, ctx: SimContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn with_water_properties(mut self, water: Box<dyn WaterProperties>) -> Self {
        self.water = water;
        self
    }

    pub fn with_psychrometrics(mut self, psych: Box<dyn Psychrometrics>) -> Self {
        self.psych = psych;
        self
    }
}

impl std::fmt::Debug for SimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimState")
            .field("ctx", &self.ctx)
            .field("nodes", &self.nodes.len())
            .field("schedules", &self.schedules.len())
            .field("curves", &self.curves.len())
            .field("tanks", &self.tanks.len())
            .field("psych", &self.psych.name())
            .field("water", &self.water.name())
            .finish()
    }
}
