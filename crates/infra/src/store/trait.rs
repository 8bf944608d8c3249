use std::sync::Arc;

use thiserror::Error;

use travelfund_ledger::Fund;

/// Failures of the snapshot storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for full-state fund snapshots.
///
/// Implementations store exactly one snapshot under a fixed key; `save`
/// replaces it wholesale. `load` returns `None` when nothing was saved yet.
pub trait FundStore {
    fn load(&self) -> Result<Option<Fund>, StoreError>;

    fn save(&self, fund: &Fund) -> Result<(), StoreError>;
}

impl<S> FundStore for Arc<S>
where
    S: FundStore + ?Sized,
{
    fn load(&self) -> Result<Option<Fund>, StoreError> {
        (**self).load()
    }

    fn save(&self, fund: &Fund) -> Result<(), StoreError> {
        (**self).save(fund)
    }
}
