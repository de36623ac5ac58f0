//! Recent search queries, most recent first.

use crate::error::{ErrorKind, Result};
use crate::keys;
use exn::ResultExt;
use folio_storage::StoreHandle;

/// How many past searches are kept unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 10;

/// A bounded, duplicate-free list of past search queries.
///
/// The list lives entirely in the store (a JSON array of strings under
/// [`keys::PAST_SEARCHES`]); nothing is cached in memory, so every call sees
/// the latest persisted state.
pub struct PastSearchLog {
    store: StoreHandle,
    capacity: usize,
}

impl PastSearchLog {
    /// A log holding at most `capacity` entries (at least one).
    pub fn new(store: StoreHandle, capacity: usize) -> Self {
        Self { store, capacity: capacity.max(1) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The stored queries, most recent first, at most [`capacity`](Self::capacity)
    /// of them.
    ///
    /// A missing, unreadable or malformed entry reads as an empty history.
    pub fn list(&self) -> Vec<String> {
        let raw = match self.store.get(keys::PAST_SEARCHES) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = ?err, "Could not read past searches");
                return Vec::new();
            },
        };
        let mut searches: Vec<String> = serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Past searches are malformed; treating as empty");
            Vec::new()
        });
        searches.truncate(self.capacity);
        searches
    }

    /// Record `query` as the most recent search.
    ///
    /// The query is trimmed first; blank queries are ignored. An existing
    /// identical entry moves to the front, and the oldest entries fall off
    /// once the log is full.
    pub fn add(&self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        let mut searches = self.list();
        searches.retain(|s| s != query);
        searches.insert(0, query.to_string());
        searches.truncate(self.capacity);
        self.save(&searches)
    }

    /// Forget every entry exactly equal to `query` (no trimming).
    pub fn remove(&self, query: &str) -> Result<()> {
        let mut searches = self.list();
        searches.retain(|s| s != query);
        self.save(&searches)
    }

    /// Forget everything, removing the key from the store.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::PAST_SEARCHES).or_raise(|| ErrorKind::Storage(keys::PAST_SEARCHES))
    }

    fn save(&self, searches: &[String]) -> Result<()> {
        let encoded = serde_json::to_string(searches).or_raise(|| ErrorKind::Storage(keys::PAST_SEARCHES))?;
        self.store
            .set(keys::PAST_SEARCHES, &encoded)
            .or_raise(|| ErrorKind::Storage(keys::PAST_SEARCHES))
    }
}
