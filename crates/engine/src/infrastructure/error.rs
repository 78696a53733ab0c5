//! Unified engine error type.
//!
//! Wraps the errors of every layer so the application and the runner can
//! handle them uniformly.

use thiserror::Error;

use super::persistence::StoreError;
use crate::use_cases::tasks::TaskError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// World store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// One or more scheduled tasks failed, or a schedule was rejected.
    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl EngineError {
    /// Task failures leave the world consistent; the turn can go on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Task(_))
    }
}
