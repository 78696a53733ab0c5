//! Task queue errors.

use delve_domain::{DomainError, Tick};

use crate::infrastructure::ports::ActionError;

/// One entry that failed while its siblings kept going.
#[derive(Debug, thiserror::Error)]
#[error("{task} at tick {tick}: {error}")]
pub struct TaskFailure {
    /// Event description, script id, or `"action"` for a repeating closure.
    pub task: String,
    pub tick: Tick,
    #[source]
    pub error: ActionError,
}

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The schedule was rejected before anything was queued.
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(#[from] DomainError),

    /// Every due entry was attempted; these ones failed.
    #[error("{} scheduled task(s) failed", .0.len())]
    ActionsFailed(Vec<TaskFailure>),
}

impl TaskError {
    pub fn failures(&self) -> &[TaskFailure] {
        match self {
            Self::ActionsFailed(failures) => failures,
            Self::InvalidSchedule(_) => &[],
        }
    }
}
