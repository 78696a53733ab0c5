//! Script executor used when no scripting runtime is attached.

use dashmap::DashMap;

use crate::infrastructure::ports::{ActionError, ScriptExecutor};

/// Logs each script it is asked to run and counts the calls.
#[derive(Debug, Default)]
pub struct LoggingScriptExecutor {
    calls: DashMap<String, u64>,
}

impl LoggingScriptExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self, script_id: &str) -> u64 {
        self.calls.get(script_id).map_or(0, |count| *count)
    }

    pub fn total_calls(&self) -> u64 {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }
}

impl ScriptExecutor for LoggingScriptExecutor {
    fn execute(&self, script_id: &str) -> Result<(), ActionError> {
        tracing::info!(script = script_id, "Executing script");
        *self.calls.entry(script_id.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_calls_per_script() {
        let executor = LoggingScriptExecutor::new();
        executor.execute("rain").unwrap();
        executor.execute("rain").unwrap();
        executor.execute("tide").unwrap();
        assert_eq!(executor.calls("rain"), 2);
        assert_eq!(executor.calls("wind"), 0);
        assert_eq!(executor.total_calls(), 3);
    }
}
