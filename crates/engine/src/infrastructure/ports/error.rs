//! Error type for work run on behalf of the task queue.

use crate::infrastructure::persistence::StoreError;

/// Failure reported by a scheduled action or by the script executor.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A script ran and reported failure.
    #[error("Script {script} failed: {message}")]
    Script { script: String, message: String },

    /// An action closure gave up.
    #[error("Action failed: {0}")]
    Failed(String),

    /// The action touched the world store and the store refused.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ActionError {
    pub fn script(script: impl Into<String>, message: impl ToString) -> Self {
        Self::Script {
            script: script.into(),
            message: message.to_string(),
        }
    }

    pub fn failed(message: impl ToString) -> Self {
        Self::Failed(message.to_string())
    }

    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_error_names_the_script() {
        let err = ActionError::script("weather.rain", "no clouds");
        assert_eq!(err.to_string(), "Script weather.rain failed: no clouds");
        assert!(!err.is_store_error());
    }

    #[test]
    fn store_errors_pass_through() {
        let err = ActionError::from(StoreError::Closed);
        assert!(err.is_store_error());
        assert_eq!(err.to_string(), StoreError::Closed.to_string());
    }
}
