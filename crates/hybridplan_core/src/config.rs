//! Process-level configuration for store and logging bootstrap.
//!
//! # Responsibility
//! - Resolve the data directory and per-resource file names.
//! - Read optional overrides from environment variables.
//!
//! # Invariants
//! - Every `ResourceKey` maps to exactly one file inside `data_dir`.
//! - Missing environment variables fall back to defaults, never to errors.

use crate::logging::{default_log_level, normalize_level};
use crate::store::ResourceKey;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "HYBRIDPLAN_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "HYBRIDPLAN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "HYBRIDPLAN_LOG_DIR";

const DEFAULT_EVENTS_FILE: &str = "events.json";
const DEFAULT_NOTES_FILE: &str = "notes.json";
const DEFAULT_CHAT_FILE: &str = "chat.json";
const DEFAULT_ACTION_ITEMS_FILE: &str = "action_items.json";
const DEFAULT_LOG_SUBDIR: &str = "logs";

/// Configuration errors raised while reading environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable is set but blank after trim.
    EmptyValue(&'static str),
    /// Log level override is not one of `trace|debug|info|warn|error`.
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(name) => write!(f, "environment variable {name} is set but empty"),
            Self::InvalidLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

/// File layout of the JSON document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub events_file: String,
    pub notes_file: String,
    pub chat_file: String,
    pub action_items_file: String,
}

impl StoreConfig {
    /// Creates a config rooted at `data_dir` with default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            events_file: DEFAULT_EVENTS_FILE.to_string(),
            notes_file: DEFAULT_NOTES_FILE.to_string(),
            chat_file: DEFAULT_CHAT_FILE.to_string(),
            action_items_file: DEFAULT_ACTION_ITEMS_FILE.to_string(),
        }
    }

    /// Reads `HYBRIDPLAN_DATA_DIR`, defaulting to the current directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(DATA_DIR_ENV) {
            Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(DATA_DIR_ENV)),
            Some(value) => Ok(Self::new(value.trim())),
            None => Ok(Self::new(".")),
        }
    }

    /// Resolves the file backing one resource kind.
    pub fn path_for(&self, key: ResourceKey) -> PathBuf {
        let file_name = match key {
            ResourceKey::Events => &self.events_file,
            ResourceKey::Notes => &self.notes_file,
            ResourceKey::Chat => &self.chat_file,
            ResourceKey::ActionItems => &self.action_items_file,
        };
        self.data_dir.join(file_name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Logging bootstrap settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// Reads `HYBRIDPLAN_LOG_LEVEL` and `HYBRIDPLAN_LOG_DIR`.
    ///
    /// The log directory defaults to `<data_dir>/logs`.
    pub fn from_env(store: &StoreConfig) -> Result<Self, ConfigError> {
        Self::from_lookup(store, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(store: &StoreConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = match lookup(LOG_LEVEL_ENV) {
            Some(value) => {
                normalize_level(&value).map_err(|_| ConfigError::InvalidLogLevel(value))?
            }
            None => default_log_level(),
        };
        let log_dir = match lookup(LOG_DIR_ENV) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyValue(LOG_DIR_ENV))
            }
            Some(value) => PathBuf::from(value.trim()),
            None => store.data_dir.join(DEFAULT_LOG_SUBDIR),
        };
        Ok(Self { level, log_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, LogConfig, StoreConfig, DATA_DIR_ENV, LOG_LEVEL_ENV};
    use crate::store::ResourceKey;
    use std::path::PathBuf;

    #[test]
    fn paths_resolve_inside_data_dir() {
        let config = StoreConfig::new("/srv/plan");
        assert_eq!(
            config.path_for(ResourceKey::Events),
            PathBuf::from("/srv/plan/events.json")
        );
        assert_eq!(
            config.path_for(ResourceKey::ActionItems),
            PathBuf::from("/srv/plan/action_items.json")
        );
    }

    #[test]
    fn missing_data_dir_defaults_to_current_dir() {
        let config = StoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("."));
    }

    #[test]
    fn blank_data_dir_is_rejected() {
        let err = StoreConfig::from_lookup(|name| {
            (name == DATA_DIR_ENV).then(|| "   ".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue(DATA_DIR_ENV));
    }

    #[test]
    fn log_config_normalizes_level_and_defaults_dir() {
        let store = StoreConfig::new("/srv/plan");
        let config = LogConfig::from_lookup(&store, |name| {
            (name == LOG_LEVEL_ENV).then(|| "WARNING".to_string())
        })
        .unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/srv/plan/logs"));

        let err = LogConfig::from_lookup(&store, |name| {
            (name == LOG_LEVEL_ENV).then(|| "loud".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
