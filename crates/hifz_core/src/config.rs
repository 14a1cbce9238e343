//! Core configuration.
//!
//! # Responsibility
//! - Describe where the storage slot lives, how logging is set up and the
//!   insight thresholds.
//! - Load from TOML; every field has a default so an empty file is valid.
//!
//! # Invariants
//! - No environment variables are consulted.
//! - `validate()` runs on every load path.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::default_log_level;
use crate::store::{SqliteStore, DEFAULT_SLOT_KEY};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub insight: InsightConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file; `None` keeps the database in memory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

/// Thresholds for the guidance heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// How many of the most recent evaluations are inspected.
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,
    /// Averages strictly below this select the intervention message.
    #[serde(default = "default_intervention_threshold")]
    pub intervention_threshold: f64,
    /// Scores at or below this count as low.
    #[serde(default = "default_low_score_threshold")]
    pub low_score_threshold: f64,
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

fn default_level() -> String {
    default_log_level().to_string()
}

fn default_recent_window() -> usize {
    10
}

fn default_intervention_threshold() -> f64 {
    5.0
}

fn default_low_score_threshold() -> f64 {
    4.0
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            slot_key: default_slot_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_dir: None,
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            recent_window: default_recent_window(),
            intervention_threshold: default_intervention_threshold(),
            low_score_threshold: default_low_score_threshold(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config TOML: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl CoreConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.slot_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.slot_key cannot be empty".to_string(),
            ));
        }
        if let Some(dir) = &self.logging.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.log_dir must be absolute, got `{}`",
                    dir.display()
                )));
            }
        }
        self.insight.validate()
    }

    /// Opens the configured SQLite database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.storage.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    /// Store over `conn` bound to the configured slot key.
    pub fn store<'c>(&self, conn: &'c Connection) -> SqliteStore<'c> {
        SqliteStore::with_slot_key(conn, self.storage.slot_key.as_str())
    }
}

impl InsightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_window == 0 {
            return Err(ConfigError::Invalid(
                "insight.recent_window must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("insight.intervention_threshold", self.intervention_threshold),
            ("insight.low_score_threshold", self.low_score_threshold),
        ] {
            if !value.is_finite() || !(0.0..=10.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0..=10, got {value}"
                )));
            }
        }
        Ok(())
    }
}
