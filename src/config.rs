//! Machine and server configuration.
//!
//! Both structs deserialize with serde and fall back to defaults for
//! missing fields. `from_env` overrides the defaults from environment
//! variables:
//! - `GUMBALL_LOCATION` - location name the machine is bound under
//! - `GUMBALL_INVENTORY` - initial gumball count
//! - `GUMBALL_SEED` - winner draw seed (default: OS entropy)
//! - `GUMBALL_HISTORY_LIMIT` - transitions kept in the audit history
//! - `GUMBALL_QUEUE_DEPTH` - remote calls buffered before callers block

use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for one gumball machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Location name, also used as the directory name
    pub location: String,
    /// Initial gumball count
    pub inventory: u32,
    /// Seed for winner draws. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Transitions retained in the audit history
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            location: "localhost".to_string(),
            inventory: 0,
            seed: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineConfig {
    /// Defaults overridden by `GUMBALL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            location: std::env::var("GUMBALL_LOCATION").unwrap_or(defaults.location),
            inventory: env_parse("GUMBALL_INVENTORY")?.unwrap_or(defaults.inventory),
            seed: env_parse("GUMBALL_SEED")?.or(defaults.seed),
            history_limit: env_parse("GUMBALL_HISTORY_LIMIT")?.unwrap_or(defaults.history_limit),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the machine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.location.trim().is_empty() {
            return Err(invalid("location", &self.location, "must not be empty"));
        }
        if self.history_limit == 0 {
            return Err(invalid("history_limit", "0", "must be at least 1"));
        }
        Ok(())
    }
}

/// Settings for the remote call server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Calls buffered before callers block
    pub queue_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { queue_depth: 32 }
    }
}

impl ServerConfig {
    /// Defaults overridden by `GUMBALL_QUEUE_DEPTH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            queue_depth: env_parse("GUMBALL_QUEUE_DEPTH")?
                .unwrap_or_else(|| Self::default().queue_depth),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject a zero-depth queue.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_depth == 0 {
            return Err(invalid("queue_depth", "0", "must be at least 1"));
        }
        Ok(())
    }
}

fn env_parse<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, raw, e.to_string()))
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}
