//! Synchronous string key-value stores.
//!
//! Session state (past searches, role, theme, filter preferences) is kept in
//! a flat string-to-string store, the same shape as a browser's local
//! storage. Each component owns its own keys; the store itself knows nothing
//! about what the values mean.

mod file;
mod memory;
mod ro;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::ro::ReadOnlyStore;
use crate::error::Result;

/// A synchronous, string-keyed persistent store.
///
/// Single `get`/`set`/`remove` calls are atomic with respect to each other;
/// no multi-key transactions are offered.
///
/// # Examples
///
/// ```
/// use folio_storage::kv::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::default();
/// store.set("theme", "dark").unwrap();
/// assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
/// store.remove("theme").unwrap();
/// assert_eq!(store.get("theme").unwrap(), None);
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
