use std::sync::Arc;

use dashmap::DashMap;
use delve_domain::{GameEvent, ScriptSchedule, Tick};

use super::{Action, RepeatEntry, TaskError, TaskFailure, TaskSource};
use crate::context::GameContext;
use crate::infrastructure::ports::ActionError;

/// Scheduler facade over the description index and the tick index.
///
/// Both indexes are internally synchronised, and no lock is held while an
/// entry runs, so actions may register further work on the same queue.
/// Within one description or one tick, entries run in registration order.
#[derive(Default)]
pub struct TaskQueue {
    by_description: DashMap<String, Vec<Arc<dyn Action>>>,
    by_tick: DashMap<Tick, Vec<RepeatEntry>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Run `action` every time an event with `description` is posted.
    /// Descriptions need not be unique.
    pub fn add_on_event(&self, description: impl Into<String>, action: Arc<dyn Action>) {
        self.by_description
            .entry(description.into())
            .or_default()
            .push(action);
    }

    /// Queue `entry` to first fire at `start`.
    pub fn add_repeating(&self, start: Tick, entry: RepeatEntry) {
        self.by_tick.entry(start).or_default().push(entry);
    }

    pub fn add_repeating_action(
        &self,
        action: Arc<dyn Action>,
        start: Tick,
        period: u64,
        stop: Option<Tick>,
    ) -> Result<(), TaskError> {
        self.add_repeating(start, RepeatEntry::action(action, period, stop)?);
        Ok(())
    }

    pub fn add_repeating_script(
        &self,
        script: impl Into<String>,
        start: Tick,
        period: u64,
        stop: Option<Tick>,
    ) -> Result<(), TaskError> {
        self.add_repeating(start, RepeatEntry::script(script, period, stop)?);
        Ok(())
    }

    /// Drop every action registered under `description`. Returns how many.
    pub fn remove_description(&self, description: &str) -> usize {
        self.by_description
            .remove(description)
            .map_or(0, |(_, actions)| actions.len())
    }

    // =========================================================================
    // Firing
    // =========================================================================

    /// Run every action registered under the event's description. The
    /// registrations stay in place for the next matching event.
    pub fn on_event(&self, ctx: &GameContext, event: &GameEvent) -> Result<usize, TaskError> {
        let actions = match self.by_description.get(event.description()) {
            Some(actions) => actions.value().clone(),
            None => return Ok(0),
        };

        let mut failures = Vec::new();
        for action in &actions {
            if let Err(error) = action.run(ctx) {
                tracing::warn!(
                    description = event.description(),
                    tick = event.tick(),
                    error = %error,
                    "Event action failed"
                );
                failures.push(TaskFailure {
                    task: event.description().to_string(),
                    tick: event.tick(),
                    error,
                });
            }
        }
        finish(actions.len(), failures)
    }

    /// Fire every entry due at `tick`, reschedule the ones whose stop tick
    /// allows it, and leave the `tick` bucket empty.
    ///
    /// Entries added for `tick` while it is being processed fire in the
    /// same call. A failing entry does not stop its siblings and is still
    /// rescheduled.
    pub fn on_tick(&self, ctx: &GameContext, tick: Tick) -> Result<usize, TaskError> {
        let mut fired = 0;
        let mut failures = Vec::new();

        while let Some((_, bucket)) = self.by_tick.remove(&tick) {
            for entry in bucket {
                fired += 1;
                if let Err(error) = run_source(ctx, &entry.source) {
                    tracing::warn!(
                        task = entry.source.label(),
                        tick,
                        error = %error,
                        "Scheduled task failed"
                    );
                    failures.push(TaskFailure {
                        task: entry.source.label().to_string(),
                        tick,
                        error,
                    });
                }

                match entry.next_due(tick) {
                    Some(next) => self.add_repeating(next, entry),
                    None => tracing::debug!(
                        task = entry.source.label(),
                        tick,
                        stop = ?entry.stop(),
                        "Repeat entry retired"
                    ),
                }
            }
        }

        finish(fired, failures)
    }

    /// Route a turn advance to [`on_tick`](Self::on_tick) and anything else
    /// to [`on_event`](Self::on_event).
    pub fn dispatch(&self, ctx: &GameContext, event: &GameEvent) -> Result<usize, TaskError> {
        if event.is_turn_advance() {
            self.on_tick(ctx, event.tick())
        } else {
            self.on_event(ctx, event)
        }
    }

    // =========================================================================
    // Inspection and persistence
    // =========================================================================

    pub fn pending_at(&self, tick: Tick) -> usize {
        self.by_tick.get(&tick).map_or(0, |bucket| bucket.len())
    }

    /// Ticks with at least one entry due, ascending.
    pub fn scheduled_ticks(&self) -> Vec<Tick> {
        let mut ticks: Vec<Tick> = self
            .by_tick
            .iter()
            .filter(|bucket| !bucket.is_empty())
            .map(|bucket| *bucket.key())
            .collect();
        ticks.sort_unstable();
        ticks
    }

    pub fn description_count(&self) -> usize {
        self.by_description.iter().map(|actions| actions.len()).sum()
    }

    pub fn repeat_count(&self) -> usize {
        self.by_tick.iter().map(|bucket| bucket.len()).sum()
    }

    /// Script entries in due-tick order, for saving. Action entries cannot
    /// be persisted and are left out.
    pub fn scripted_entries(&self) -> Vec<(Tick, ScriptSchedule)> {
        let mut skipped = 0;
        let mut entries = Vec::new();
        for tick in self.scheduled_ticks() {
            let Some(bucket) = self.by_tick.get(&tick) else {
                continue;
            };
            for entry in bucket.iter() {
                match entry.to_script_schedule() {
                    Some(schedule) => entries.push((tick, schedule)),
                    None => skipped += 1,
                }
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "Action entries are not persisted");
        }
        entries
    }

    /// Re-queue script entries loaded from storage.
    pub fn restore_scripted(&self, entries: impl IntoIterator<Item = (Tick, ScriptSchedule)>) -> usize {
        let mut restored = 0;
        for (tick, schedule) in entries {
            self.add_repeating(tick, RepeatEntry::from(schedule));
            restored += 1;
        }
        restored
    }
}

fn run_source(ctx: &GameContext, source: &TaskSource) -> Result<(), ActionError> {
    match source {
        TaskSource::Action(action) => action.run(ctx),
        TaskSource::Script(script) => ctx.scripts.execute(script),
    }
}

fn finish(fired: usize, failures: Vec<TaskFailure>) -> Result<usize, TaskError> {
    if failures.is_empty() {
        Ok(fired)
    } else {
        Err(TaskError::ActionsFailed(failures))
    }
}
