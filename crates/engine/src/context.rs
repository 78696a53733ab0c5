//! The context handed to every scheduled action.

use std::sync::Arc;

use delve_domain::Tick;

use crate::infrastructure::ports::{ResourceLookup, ScriptExecutor, TurnClock};
use crate::stores::WorldStore;

/// Everything an action may touch, passed explicitly on each call.
#[derive(Clone)]
pub struct GameContext {
    pub store: Arc<WorldStore>,
    pub resources: Arc<dyn ResourceLookup>,
    pub clock: Arc<dyn TurnClock>,
    pub scripts: Arc<dyn ScriptExecutor>,
}

impl GameContext {
    pub fn new(
        store: Arc<WorldStore>,
        resources: Arc<dyn ResourceLookup>,
        clock: Arc<dyn TurnClock>,
        scripts: Arc<dyn ScriptExecutor>,
    ) -> Self {
        Self {
            store,
            resources,
            clock,
            scripts,
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }
}
