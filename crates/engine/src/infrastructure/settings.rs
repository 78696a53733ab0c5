//! Engine configuration.
//!
//! Read from `DELVE_`-prefixed environment variables (after `.env` files
//! have been loaded by the binary). Every field has a default, so an empty
//! environment yields [`EngineConfig::default`].

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "DELVE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory of the world store.
    pub store_path: PathBuf,
    /// Candidates tried per identifier allocation before giving up.
    pub uid_attempts: usize,
    /// Pause between turns in the runner.
    pub turn_interval_ms: u64,
    /// Turns to run before stopping; 0 runs until interrupted.
    pub max_turns: u64,
    /// Commit the store every this many turns.
    pub commit_every: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("delve.db"),
            uid_attempts: 4096,
            turn_interval_ms: 250,
            max_turns: 0,
            commit_every: 10,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let config: Self = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uid_attempts == 0 {
            return Err(ConfigError::Message(
                "uid_attempts must be at least 1".to_string(),
            ));
        }
        if self.commit_every == 0 {
            return Err(ConfigError::Message(
                "commit_every must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn turn_interval(&self) -> Duration {
        Duration::from_millis(self.turn_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = EngineConfig::from_source(env(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.turn_interval(), Duration::from_millis(250));
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let config = EngineConfig::from_source(env(&[
            ("DELVE_STORE_PATH", "/tmp/world"),
            ("DELVE_MAX_TURNS", "40"),
            ("DELVE_COMMIT_EVERY", "5"),
        ]))
        .unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/world"));
        assert_eq!(config.max_turns, 40);
        assert_eq!(config.commit_every, 5);
        assert_eq!(config.uid_attempts, 4096);
    }

    #[test]
    fn zero_commit_cadence_is_rejected() {
        assert!(EngineConfig::from_source(env(&[("DELVE_COMMIT_EVERY", "0")])).is_err());
    }
}
