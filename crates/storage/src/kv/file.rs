//! JSON-file backed key-value store.

use crate::error::{ErrorKind, Result};
use crate::kv::KeyValueStore;
use exn::ResultExt;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::instrument;

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object on disk.
///
/// The whole file is loaded once on [`open`](Self::open) and rewritten on
/// every `set`/`remove`, through a temporary sibling file that is renamed
/// over the original, so a crash mid-write never leaves a truncated store.
///
/// A file whose contents are not a JSON object of strings is logged and
/// treated as empty; the next write replaces it.
///
/// # Examples
///
/// ```no_run
/// use folio_storage::kv::{FileStore, KeyValueStore};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileStore::open("/home/reader/.local/share/folio/state.json")?;
/// store.set("ol-user-role", "librarian")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStore {
    /// Open (without creating) the store at `path`.
    ///
    /// A missing file is an empty store; it is created on the first write.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => Self::parse(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(e) => exn::bail!(ErrorKind::from_io(e, path)),
        };
        tracing::debug!(entries = entries.len(), "Opened state store");
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(raw: &str) -> Entries {
        if raw.trim().is_empty() {
            return Entries::new();
        }
        serde_json::from_str(raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "State store is malformed; starting from an empty store");
            Entries::new()
        })
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_default());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(entries).or_raise(|| ErrorKind::InvalidData("state entries".to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| exn::Exn::from(ErrorKind::from_io(e, parent)))?;
        }
        let temporary = self.temporary_path();
        fs::write(&temporary, encoded).map_err(|e| exn::Exn::from(ErrorKind::from_io(e, &temporary)))?;
        fs::rename(&temporary, &self.path).map_err(|e| exn::Exn::from(ErrorKind::from_io(e, &self.path)))?;
        Ok(())
    }

    fn update(&self, change: impl FnOnce(&mut Entries) -> bool) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        if change(&mut next) {
            self.persist(&next)?;
            *entries = next;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| entries.insert(key.to_string(), value.to_string()).as_deref() != Some(value))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| entries.remove(key).is_some())
    }
}
