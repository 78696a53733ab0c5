//! Application state and composition.

use std::sync::Arc;

use delve_domain::{GameEvent, Tick};

use crate::context::GameContext;
use crate::infrastructure::{
    clock::TurnCounter,
    error::EngineError,
    ports::{ResourceLookup, ScriptExecutor, TurnClock},
    settings::EngineConfig,
};
use crate::stores::WorldStore;
use crate::use_cases::tasks::TaskQueue;

/// Main application state.
///
/// Owns the world store, the task queue and the turn counter, and wires
/// them into the [`GameContext`] that scheduled actions receive.
pub struct App {
    pub context: GameContext,
    pub tasks: Arc<TaskQueue>,
    clock: Arc<TurnCounter>,
}

impl App {
    /// Open the world at `config.store_path`, restore its scheduled scripts
    /// and resume the clock at the last saved tick.
    pub fn open(
        config: &EngineConfig,
        resources: Arc<dyn ResourceLookup>,
        scripts: Arc<dyn ScriptExecutor>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let store = Arc::new(WorldStore::open(
            &config.store_path,
            Arc::clone(&resources),
            config.uid_attempts,
        )?);

        let tasks = Arc::new(TaskQueue::new());
        let restored = tasks.restore_scripted(store.load_scheduled_scripts()?);
        let clock = Arc::new(TurnCounter::starting_at(store.last_tick()?));

        tracing::info!(
            tick = clock.current_tick(),
            restored,
            path = %config.store_path.display(),
            "World opened"
        );

        let context = GameContext::new(store, resources, clock.clone(), scripts);
        Ok(Self {
            context,
            tasks,
            clock,
        })
    }

    pub fn store(&self) -> &WorldStore {
        &self.context.store
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    /// Move the clock forward one tick and fire what is due.
    ///
    /// The tick counts as reached even if some of its tasks fail; the error
    /// lists the failures.
    pub fn advance_turn(&self) -> Result<Tick, EngineError> {
        if self.store().is_closed() {
            return Err(crate::infrastructure::persistence::StoreError::Closed.into());
        }
        let tick = self.clock.advance();
        let fired = self
            .tasks
            .dispatch(&self.context, &GameEvent::turn_advance(tick))?;
        tracing::debug!(tick, fired, "Turn advanced");
        Ok(tick)
    }

    /// Post a domain event at the current tick.
    pub fn post_event(&self, description: impl Into<String>) -> Result<usize, EngineError> {
        let event = GameEvent::new(description, self.current_tick());
        Ok(self.tasks.dispatch(&self.context, &event)?)
    }

    fn save_session(&self) -> Result<(), EngineError> {
        let store = self.store();
        store.save_tick(self.current_tick())?;
        store.save_scheduled_scripts(self.tasks.scripted_entries())?;
        Ok(())
    }

    /// Save the tick and scheduled scripts, then commit. Returns the commit
    /// version.
    pub fn commit(&self) -> Result<u64, EngineError> {
        self.save_session()?;
        Ok(self.store().commit()?)
    }

    /// Save, commit and close the world store.
    pub fn shutdown(&self) -> Result<(), EngineError> {
        self.save_session()?;
        self.store().close()?;
        tracing::info!(tick = self.current_tick(), "World closed");
        Ok(())
    }
}
