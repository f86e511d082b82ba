//! Runtime settings for the demo binary, resolved from the environment.
//!
//! # Invariants
//! - Every setting has a default; unset variables are never an error.
//! - `log_dir` is `None` unless explicitly configured, which disables file
//!   logging.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_FILE_ENV: &str = "STOCKPILE_DATA_FILE";
pub const LOG_LEVEL_ENV: &str = "STOCKPILE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STOCKPILE_LOG_DIR";
pub const DEFAULT_DATA_FILE: &str = "inventory_data.json";

/// Supported log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `debug` for debug builds, `info` for release builds.
    pub fn default_for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::InvalidValue {
                key: LOG_LEVEL_ENV,
                value: other.to_string(),
                expected: "trace|debug|info|warn|error",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid {key} value `{value}`; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Snapshot path used by the inventory records demo.
    pub data_file: PathBuf,
    pub log_level: LogLevel,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: LogLevel::default_for_build(),
            log_dir: None,
        }
    }
}

impl DemoConfig {
    /// Resolves settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = read(DATA_FILE_ENV) {
            config.data_file = PathBuf::from(path.trim());
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level.parse()?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            let dir = PathBuf::from(dir.trim());
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: LOG_DIR_ENV,
                    value: dir.display().to_string(),
                    expected: "an absolute directory path",
                });
            }
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DemoConfig, LogLevel, DEFAULT_DATA_FILE};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<DemoConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DemoConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = config_from(&[("STOCKPILE_DATA_FILE", "  ")]).unwrap();
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.log_level, LogLevel::default_for_build());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn level_parsing_is_case_insensitive() {
        let config = config_from(&[("STOCKPILE_LOG_LEVEL", " WARNING ")]).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn invalid_level_and_relative_log_dir_are_rejected() {
        let err = config_from(&[("STOCKPILE_LOG_LEVEL", "loud")]).unwrap_err();
        assert!(err.to_string().contains("STOCKPILE_LOG_LEVEL"));

        let err = config_from(&[("STOCKPILE_LOG_DIR", "logs")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "STOCKPILE_LOG_DIR", .. }));
    }
}
