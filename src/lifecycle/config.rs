//! Runtime settings for the cafeteria system.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! `cafeteria.toml` in the working directory, then `CAFETERIA_*` environment variables.
//!
//! ```toml
//! min_delay_ms = 2000
//! max_delay_ms = 5000
//! actor_buffer = 32
//! event_capacity = 64
//! ```

use crate::framework::UniformDelay;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "cafeteria.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Delay window is empty: min {min_ms} ms must be below max {max_ms} ms")]
    EmptyDelayWindow { min_ms: u64, max_ms: u64 },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CafeteriaConfig {
    /// Lower bound of the preparation delay, inclusive.
    pub min_delay_ms: u64,
    /// Upper bound of the preparation delay, exclusive.
    pub max_delay_ms: u64,
    /// Capacity of each actor's request channel.
    pub actor_buffer: usize,
    /// Events kept for a slow subscriber before it starts lagging.
    pub event_capacity: usize,
}

impl Default for CafeteriaConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 2000,
            max_delay_ms: 5000,
            actor_buffer: 32,
            event_capacity: 64,
        }
    }
}

impl CafeteriaConfig {
    /// Reads `cafeteria.toml` if present, applies the environment and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        info!(
            min_delay_ms = config.min_delay_ms,
            max_delay_ms = config.max_delay_ms,
            actor_buffer = config.actor_buffer,
            event_capacity = config.event_capacity,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Overrides fields from `lookup`, which maps a variable name to its value.
    ///
    /// `load` passes the process environment; tests pass a closure over a map.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "CAFETERIA_MIN_DELAY_MS", &mut self.min_delay_ms)?;
        override_from(&lookup, "CAFETERIA_MAX_DELAY_MS", &mut self.max_delay_ms)?;
        override_from(&lookup, "CAFETERIA_ACTOR_BUFFER", &mut self.actor_buffer)?;
        override_from(&lookup, "CAFETERIA_EVENT_CAPACITY", &mut self.event_capacity)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_delay_ms >= self.max_delay_ms {
            return Err(ConfigError::EmptyDelayWindow {
                min_ms: self.min_delay_ms,
                max_ms: self.max_delay_ms,
            });
        }
        if self.actor_buffer == 0 {
            return Err(ConfigError::Zero("actor_buffer"));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Zero("event_capacity"));
        }
        Ok(())
    }

    /// The preparation delay drawn uniformly from `[min_delay_ms, max_delay_ms)`.
    pub fn delay_policy(&self) -> UniformDelay {
        UniformDelay::new(
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}

fn override_from<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(());
    };
    match value.trim().parse() {
        Ok(parsed) => {
            *target = parsed;
            Ok(())
        }
        Err(_) => {
            warn!(key, %value, "Invalid override");
            Err(ConfigError::InvalidValue { key, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_widget_timing() {
        let config = CafeteriaConfig::default();
        assert_eq!(config.min_delay_ms, 2000);
        assert_eq!(config.max_delay_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = CafeteriaConfig::from_toml_str("max_delay_ms = 9000\n").unwrap();
        assert_eq!(config.max_delay_ms, 9000);
        assert_eq!(config.min_delay_ms, 2000);
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = CafeteriaConfig::from_toml_str("max_delay = 9000\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config =
            CafeteriaConfig::from_toml_str("min_delay_ms = 100\nmax_delay_ms = 200\n").unwrap();
        config
            .apply_overrides(env(&[
                ("CAFETERIA_MAX_DELAY_MS", "300"),
                ("CAFETERIA_ACTOR_BUFFER", " 8 "),
            ]))
            .unwrap();
        assert_eq!(config.min_delay_ms, 100);
        assert_eq!(config.max_delay_ms, 300);
        assert_eq!(config.actor_buffer, 8);
    }

    #[test]
    fn test_bad_override_names_the_variable() {
        let mut config = CafeteriaConfig::default();
        let err = config
            .apply_overrides(env(&[("CAFETERIA_MIN_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "CAFETERIA_MIN_DELAY_MS", .. }
        ));
    }

    #[test]
    fn test_inverted_window_fails_validation() {
        let config = CafeteriaConfig {
            min_delay_ms: 5000,
            max_delay_ms: 5000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyDelayWindow { min_ms: 5000, max_ms: 5000 })
        ));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let config = CafeteriaConfig::from_file(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, CafeteriaConfig::default());
    }
}
