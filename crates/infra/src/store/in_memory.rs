use std::sync::RwLock;

use travelfund_ledger::Fund;

use super::r#trait::{FundStore, StoreError};

/// In-memory snapshot store.
///
/// Intended for tests/dev. Snapshots go through the same JSON encoding as the
/// file store so that what comes back out is exactly what a restore would see.
#[derive(Debug, Default)]
pub struct InMemoryFundStore {
    snapshot: RwLock<Option<String>>,
}

impl InMemoryFundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw JSON snapshot.
    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            snapshot: RwLock::new(Some(json.into())),
        }
    }

    /// The last saved snapshot, as JSON.
    pub fn raw_snapshot(&self) -> Option<String> {
        self.snapshot.read().ok().and_then(|s| s.clone())
    }
}

impl FundStore for InMemoryFundStore {
    fn load(&self) -> Result<Option<Fund>, StoreError> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        match snapshot.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, fund: &Fund) -> Result<(), StoreError> {
        let json = serde_json::to_string(fund)?;
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        *snapshot = Some(json);
        Ok(())
    }
}
