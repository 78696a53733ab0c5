//! Turn-based game time.
//!
//! The simulation advances in whole ticks. A [`Schedule`] describes a
//! recurring piece of work: how many ticks lie between firings and the last
//! tick (inclusive) at which it may still fire.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// One simulation turn.
pub type Tick = u64;

/// Period and optional stop tick of a recurring task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    period: u64,
    stop: Option<Tick>,
}

impl Schedule {
    /// A stop tick of `0` means "no stop", same as `None`.
    pub fn new(period: u64, stop: Option<Tick>) -> Result<Self, DomainError> {
        if period == 0 {
            return Err(DomainError::validation(
                "repeat period must be at least one tick",
            ));
        }
        Ok(Self {
            period,
            stop: stop.filter(|&s| s != 0),
        })
    }

    pub fn unbounded(period: u64) -> Result<Self, DomainError> {
        Self::new(period, None)
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn stop(&self) -> Option<Tick> {
        self.stop
    }

    /// Tick of the next firing after one at `tick`, or `None` once the stop
    /// tick would be passed.
    pub fn next_due(&self, tick: Tick) -> Option<Tick> {
        let next = tick.checked_add(self.period)?;
        match self.stop {
            Some(stop) if next > stop => None,
            _ => Some(next),
        }
    }
}

/// A recurring script invocation in its persistable form.
///
/// Scheduled closures cannot outlive the process; scheduled scripts can, so
/// this is what the world store writes out between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSchedule {
    pub script: String,
    pub schedule: Schedule,
}

impl ScriptSchedule {
    pub fn new(script: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            script: script.into(),
            schedule,
        }
    }
}
