use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use travelfund_ledger::Fund;

use super::r#trait::{FundStore, StoreError};
use crate::config::StoreConfig;

/// Snapshot store backed by a single JSON file.
///
/// Saves write a sibling temp file and rename it into place, so readers see
/// either the previous or the new snapshot, never a partial one.
#[derive(Debug, Clone)]
pub struct JsonFileFundStore {
    path: PathBuf,
}

impl JsonFileFundStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.snapshot_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl FundStore for JsonFileFundStore {
    fn load(&self) -> Result<Option<Fund>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot on disk");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let fund = serde_json::from_str(&json)?;
        debug!(path = %self.path.display(), bytes = json.len(), "snapshot loaded");
        Ok(Some(fund))
    }

    fn save(&self, fund: &Fund) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(fund)?;
        let temp = self.temp_path();
        fs::write(&temp, &json)?;
        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), bytes = json.len(), "snapshot saved");
        Ok(())
    }
}
