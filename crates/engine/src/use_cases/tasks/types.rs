use std::fmt;
use std::sync::Arc;

use delve_domain::{DomainError, Schedule, ScriptSchedule, Tick};

use crate::context::GameContext;
use crate::infrastructure::ports::ActionError;

/// Work the queue can run. Implemented for every matching closure.
pub trait Action: Send + Sync {
    fn run(&self, ctx: &GameContext) -> Result<(), ActionError>;
}

impl<F> Action for F
where
    F: Fn(&GameContext) -> Result<(), ActionError> + Send + Sync,
{
    fn run(&self, ctx: &GameContext) -> Result<(), ActionError> {
        self(ctx)
    }
}

/// Wrap a closure as a shareable action.
pub fn action_fn<F>(f: F) -> Arc<dyn Action>
where
    F: Fn(&GameContext) -> Result<(), ActionError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a repeat entry runs: an in-process action or a script id for the
/// script executor. Only scripts survive a restart.
#[derive(Clone)]
pub enum TaskSource {
    Action(Arc<dyn Action>),
    Script(String),
}

impl TaskSource {
    /// Label used in logs and failure reports.
    pub fn label(&self) -> &str {
        match self {
            Self::Action(_) => "action",
            Self::Script(script) => script,
        }
    }
}

impl fmt::Debug for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(_) => f.write_str("Action(..)"),
            Self::Script(script) => f.debug_tuple("Script").field(script).finish(),
        }
    }
}

/// A scheduled unit of work that recurs every `period` ticks until its
/// optional stop tick.
#[derive(Debug, Clone)]
pub struct RepeatEntry {
    pub source: TaskSource,
    schedule: Schedule,
}

impl RepeatEntry {
    /// A stop tick of `0` means "no stop". A period of `0` is rejected.
    pub fn new(source: TaskSource, period: u64, stop: Option<Tick>) -> Result<Self, DomainError> {
        Ok(Self {
            source,
            schedule: Schedule::new(period, stop)?,
        })
    }

    pub fn action(action: Arc<dyn Action>, period: u64, stop: Option<Tick>) -> Result<Self, DomainError> {
        Self::new(TaskSource::Action(action), period, stop)
    }

    pub fn script(script: impl Into<String>, period: u64, stop: Option<Tick>) -> Result<Self, DomainError> {
        Self::new(TaskSource::Script(script.into()), period, stop)
    }

    pub fn period(&self) -> u64 {
        self.schedule.period()
    }

    pub fn stop(&self) -> Option<Tick> {
        self.schedule.stop()
    }

    /// Where to reinsert after firing at `tick`: only while
    /// `tick + period <= stop`.
    pub fn next_due(&self, tick: Tick) -> Option<Tick> {
        self.schedule.next_due(tick)
    }

    /// Persistable form, for script entries only.
    pub fn to_script_schedule(&self) -> Option<ScriptSchedule> {
        match &self.source {
            TaskSource::Script(script) => Some(ScriptSchedule::new(script.clone(), self.schedule)),
            TaskSource::Action(_) => None,
        }
    }
}

impl From<ScriptSchedule> for RepeatEntry {
    fn from(value: ScriptSchedule) -> Self {
        Self {
            source: TaskSource::Script(value.script),
            schedule: value.schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_zero_means_unbounded() {
        let entry = RepeatEntry::script("tide", 3, Some(0)).unwrap();
        assert_eq!(entry.stop(), None);
        assert_eq!(entry.next_due(300), Some(303));
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(RepeatEntry::script("tide", 0, None).is_err());
    }

    #[test]
    fn only_scripts_are_persistable() {
        let script = RepeatEntry::script("rain", 5, Some(12)).unwrap();
        let schedule = script.to_script_schedule().unwrap();
        assert_eq!(schedule.script, "rain");
        assert_eq!(schedule.schedule.stop(), Some(12));

        let action = RepeatEntry::action(action_fn(|_| Ok(())), 5, None).unwrap();
        assert!(action.to_script_schedule().is_none());
        assert_eq!(action.source.label(), "action");
    }
}
