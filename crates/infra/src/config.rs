//! Storage configuration, read from the environment.

use std::path::PathBuf;

use thiserror::Error;

/// Storage identifier used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "travel-fund-data";

pub const DATA_DIR_VAR: &str = "TRAVEL_FUND_DATA_DIR";
pub const STORAGE_KEY_VAR: &str = "TRAVEL_FUND_STORAGE_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid storage key '{0}': must be non-empty and contain no path separators")]
    InvalidStorageKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read `TRAVEL_FUND_DATA_DIR` / `TRAVEL_FUND_STORAGE_KEY`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let storage_key = lookup(STORAGE_KEY_VAR).unwrap_or(defaults.storage_key);

        let config = Self {
            data_dir,
            storage_key,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self.storage_key.trim();
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }
        Ok(())
    }

    /// `<data_dir>/<storage_key>.json`
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key.trim()))
    }
}
