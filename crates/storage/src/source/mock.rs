//! In-memory document source for testing.

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use crate::source::DocumentSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

#[derive(Default)]
struct State {
    documents: HashMap<PathBuf, Vec<u8>>,
    failures: HashMap<PathBuf, String>,
    reads: HashMap<PathBuf, usize>,
}

/// In-memory document source for testing.
///
/// Besides serving documents it counts reads per path (so tests can assert
/// how many fetches happened) and can be told to fail reads of a path with a
/// retryable [`Network`](ErrorKind::Network) error.
///
/// # Examples
///
/// ```
/// use folio_storage::source::{DocumentSource, MockSource};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MockSource::with_documents([("data/books.json", "[]")]);
/// assert_eq!(source.read(Path::new("data/books.json")).await?, b"[]");
/// assert_eq!(source.reads("data/books.json"), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockSource {
    name: String,
    state: Mutex<State>,
}

impl MockSource {
    /// Create a mock source pre-populated with documents.
    ///
    /// Panics if any path fails validation. If test setup is wrong, then the
    /// test should not pass.
    pub fn with_documents(documents: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let mut state = State::default();
        for (path, data) in documents {
            let path = path.into();
            let Ok(validated) = validate_path(&path) else {
                panic!("MockSource::with_documents: invalid path {}", path.display());
            };
            state.documents.insert(validated, data.into());
        }
        Self {
            name: "mock".to_string(),
            state: Mutex::new(state),
        }
    }

    /// Change the name of the mock source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace (or add) a document.
    pub fn put(&self, path: impl AsRef<Path>, data: impl Into<Vec<u8>>) {
        let path = validate_path(path.as_ref()).expect("MockSource::put: invalid path");
        self.state().documents.insert(path, data.into());
    }

    /// Make every subsequent read of `path` fail until [`heal`](Self::heal) is called.
    pub fn fail(&self, path: impl AsRef<Path>, reason: impl Into<String>) {
        let path = validate_path(path.as_ref()).expect("MockSource::fail: invalid path");
        self.state().failures.insert(path, reason.into());
    }

    /// Stop failing reads of `path`.
    pub fn heal(&self, path: impl AsRef<Path>) {
        if let Ok(path) = validate_path(path.as_ref()) {
            self.state().failures.remove(&path);
        }
    }

    /// Number of reads attempted for `path`, failed ones included.
    pub fn reads(&self, path: impl AsRef<Path>) -> usize {
        validate_path(path.as_ref()).map(|path| self.state().reads.get(&path).copied().unwrap_or(0)).unwrap_or(0)
    }
}
impl Default for MockSource {
    fn default() -> Self {
        let documents: [(&str, &str); 0] = [];
        Self::with_documents(documents)
    }
}

#[async_trait]
impl DocumentSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.state().documents.contains_key(&path))
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        let mut state = self.state();
        *state.reads.entry(path.clone()).or_default() += 1;
        if let Some(reason) = state.failures.get(&path) {
            exn::bail!(ErrorKind::Network(reason.clone()));
        }
        state.documents.get(&path).cloned().ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_counts() {
        let source = MockSource::with_documents([("books.json", "[]")]);
        source.read(Path::new("books.json")).await.unwrap();
        source.read(Path::new("./books.json")).await.unwrap();
        assert_eq!(source.reads("books.json"), 2);
        assert_eq!(source.reads("series.json"), 0);
    }

    #[tokio::test]
    async fn test_read_not_found_is_counted() {
        let source = MockSource::default();
        let err = source.read(Path::new("missing.json")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        assert_eq!(source.reads("missing.json"), 1);
    }

    #[tokio::test]
    async fn test_fail_and_heal() {
        let source = MockSource::with_documents([("books.json", "[]")]);
        source.fail("books.json", "offline");
        let err = source.read(Path::new("books.json")).await.unwrap_err();
        assert!(err.is_retryable());
        source.heal("books.json");
        assert!(source.read(Path::new("books.json")).await.is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid path")]
    fn test_with_documents_panics_on_bad_path() {
        MockSource::with_documents([("../escape.json", "[]")]);
    }
}
