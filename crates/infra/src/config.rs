//! Runtime configuration read from `WAREHOUSE_*` environment variables.

use std::path::PathBuf;

use thiserror::Error;
use warehouse_inventory::DEFAULT_TOP_COUNT;
use warehouse_observability::{LogFormat, UnknownLogFormat};

pub const DATA_FILE_VAR: &str = "WAREHOUSE_DATA_FILE";
pub const TOP_COUNT_VAR: &str = "WAREHOUSE_TOP_COUNT";
pub const LOG_FORMAT_VAR: &str = "WAREHOUSE_LOG_FORMAT";

pub const DEFAULT_DATA_FILE: &str = "warehouse.txt";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidTopCount { var: &'static str, value: String },

    #[error("{var}: {reason}")]
    InvalidLogFormat { var: &'static str, reason: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub data_file: PathBuf,
    pub top_count: usize,
    pub log_format: LogFormat,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            top_count: DEFAULT_TOP_COUNT,
            log_format: LogFormat::default(),
        }
    }
}

impl WarehouseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(DATA_FILE_VAR) {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { var: DATA_FILE_VAR });
            }
            config.data_file = PathBuf::from(value);
        }

        if let Some(value) = lookup(TOP_COUNT_VAR) {
            config.top_count = match value.trim().parse::<usize>() {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(ConfigError::InvalidTopCount {
                        var: TOP_COUNT_VAR,
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            config.log_format = value.parse().map_err(|e: UnknownLogFormat| {
                ConfigError::InvalidLogFormat {
                    var: LOG_FORMAT_VAR,
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }
}
