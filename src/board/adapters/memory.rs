//! In-memory record store for tests and volatile sessions.

use crate::board::ports::{Collection, RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory record store.
///
/// Clones share the same underlying storage, so a test can keep a handle and
/// inspect what the board flushed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<RwLock<HashMap<Collection, Vec<Value>>>>,
}

impl InMemoryRecordStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records` under `collection`.
    #[must_use]
    pub fn with_records(collection: Collection, records: Vec<Value>) -> Self {
        let mut state = HashMap::new();
        state.insert(collection, records);
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Returns a snapshot of the records stored under `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the lock is poisoned.
    pub fn snapshot(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(state.get(&collection).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn load(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        self.snapshot(collection)
    }

    async fn save(&self, collection: Collection, records: &[Value]) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        state.insert(collection, records.to_vec());
        Ok(())
    }
}
