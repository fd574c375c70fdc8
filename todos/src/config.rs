//! Configuration for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::TodoCollection;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;
use todostore_runtime::{DEFAULT_ACTION_BROADCAST_CAPACITY, StoreConfig};

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "todos=info,todostore_runtime=info";

/// Errors from loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Raw value found
        value: String,
    },
}

/// Which todos the store starts with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// The three sample todos
    #[default]
    Sample,
    /// No todos
    Empty,
}

impl SeedMode {
    /// Builds the initial collection for this mode
    #[must_use]
    pub fn initial_todos(self) -> TodoCollection {
        match self {
            Self::Sample => TodoCollection::seed(),
            Self::Empty => TodoCollection::new(),
        }
    }
}

impl FromStr for SeedMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "empty" => Ok(Self::Empty),
            _ => Err(()),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Initial todos (`TODOS_SEED`: `sample` or `empty`, default `sample`)
    pub seed: SeedMode,
    /// Action observer buffer (`TODOS_BROADCAST_CAPACITY`, default 16)
    pub action_broadcast_capacity: usize,
    /// Tracing filter directives (`RUST_LOG`)
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: SeedMode::default(),
            action_broadcast_capacity: DEFAULT_ACTION_BROADCAST_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A variable that cannot be parsed falls back to its own default; the
    /// other variables are still read. The rejected values are returned so
    /// the caller can report them once logging is up.
    #[must_use]
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup_lenient(|key| env::var(key).ok())
    }

    /// Lenient counterpart of [`Config::from_lookup`], defaulting per variable
    #[must_use]
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut rejected = Vec::new();

        let config = Self {
            seed: or_reject(parse_var(&lookup, "TODOS_SEED"), &mut rejected)
                .unwrap_or(defaults.seed),
            action_broadcast_capacity: or_reject(
                parse_var(&lookup, "TODOS_BROADCAST_CAPACITY"),
                &mut rejected,
            )
            .unwrap_or(defaults.action_broadcast_capacity),
            log_filter: log_filter(&lookup).unwrap_or(defaults.log_filter),
        };

        (config, rejected)
    }

    /// Load configuration from environment variables, rejecting bad values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first variable that is
    /// set but unparseable.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first variable that is
    /// set but unparseable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            seed: parse_var(&lookup, "TODOS_SEED")?.unwrap_or(defaults.seed),
            action_broadcast_capacity: parse_var(&lookup, "TODOS_BROADCAST_CAPACITY")?
                .unwrap_or(defaults.action_broadcast_capacity),
            log_filter: log_filter(&lookup).unwrap_or(defaults.log_filter),
        })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.action_broadcast_capacity)
    }

    /// Todos the store starts with
    #[must_use]
    pub fn initial_todos(&self) -> TodoCollection {
        self.seed.initial_todos()
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

fn or_reject<T>(
    parsed: Result<Option<T>, ConfigError>,
    rejected: &mut Vec<ConfigError>,
) -> Option<T> {
    parsed.unwrap_or_else(|error| {
        rejected.push(error);
        None
    })
}

fn log_filter<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG").filter(|s| !s.trim().is_empty())
}
