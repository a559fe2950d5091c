use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "slabq.toml";

/// Settings for the demo driver scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Writer pause between the first push and the burst of three.
    #[serde(default = "default_short_delay_ms")]
    pub short_delay_ms: u64,
    /// Writer pause before the final push.
    #[serde(default = "default_long_delay_ms")]
    pub long_delay_ms: u64,
    /// Reader pause after its first pop.
    #[serde(default = "default_reader_pause_ms")]
    pub reader_pause_ms: u64,
    #[serde(default = "default_pop_timeout_ms")]
    pub pop_timeout_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            short_delay_ms: default_short_delay_ms(),
            long_delay_ms: default_long_delay_ms(),
            reader_pause_ms: default_reader_pause_ms(),
            pop_timeout_ms: default_pop_timeout_ms(),
        }
    }
}

fn default_capacity() -> usize { 2 }
fn default_short_delay_ms() -> u64 { 1000 }
fn default_long_delay_ms() -> u64 { 5000 }
fn default_reader_pause_ms() -> u64 { 2000 }
fn default_pop_timeout_ms() -> u64 { 100 }

impl DemoConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if present, or fall back to defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p).map_err(|e| ConfigError::Read {
                    path: p.into(),
                    message: e.to_string(),
                })?;
                Self::from_toml(&content)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                let content = std::fs::read_to_string(DEFAULT_CONFIG_FILE).map_err(|e| {
                    ConfigError::Read {
                        path: DEFAULT_CONFIG_FILE.into(),
                        message: e.to_string(),
                    }
                })?;
                Self::from_toml(&content)?
            }
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.validate()?;
        info!(capacity = config.capacity, "Demo config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn short_delay(&self) -> Duration {
        Duration::from_millis(self.short_delay_ms)
    }

    pub fn long_delay(&self) -> Duration {
        Duration::from_millis(self.long_delay_ms)
    }

    pub fn reader_pause(&self) -> Duration {
        Duration::from_millis(self.reader_pause_ms)
    }

    pub fn pop_timeout(&self) -> Duration {
        Duration::from_millis(self.pop_timeout_ms)
    }
}
