//! Read-only key-value store.
//!
//! Wraps another store and prevents writes from reaching it, while still
//! reporting success to the caller.

use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::StoreHandle;

/// Read-only store decorator.
///
/// Reads are delegated; `set` and `remove` are dropped with an
/// [`info event`](tracing::Event). Session state still changes in memory for
/// the components that hold it, it just never gets persisted.
#[derive(Clone)]
pub struct ReadOnlyStore {
    inner: StoreHandle,
}
impl ReadOnlyStore {
    pub fn new(inner: StoreHandle) -> Self {
        Self { inner }
    }
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::info!(key, bytes = value.len(), "Skipping state write during read-only mode");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        tracing::info!(key, "Skipping state removal during read-only mode");
        Ok(())
    }
}
