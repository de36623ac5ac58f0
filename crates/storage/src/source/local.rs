//! Local filesystem document source.
//!
//! Serves documents from a directory (typically the static asset root the
//! catalog pages are published from) using `tokio::fs`.

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use crate::source::DocumentSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Local filesystem document source.
///
/// # Examples
///
/// ```no_run
/// use folio_storage::source::LocalSource;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = LocalSource::new("public", "/srv/catalog/public")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalSource {
    name: String,
    root: PathBuf,
}
impl LocalSource {
    /// Create a new local document source.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if `root` is not
    /// absolute or is not an existing directory. Unlike a writable library,
    /// a document root is never created on demand.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() || !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { name: name.into(), root })
    }

    fn absolute_path(&self, path: &Path) -> Result<PathBuf> {
        Ok(self.root.join(validate_path(path)?))
    }
}

#[async_trait]
impl DocumentSource for LocalSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let absolute = self.absolute_path(path)?;
        tokio::fs::try_exists(&absolute)
            .await
            .map_err(|e| exn::Exn::from(ErrorKind::from_io(e, path)))
    }

    #[instrument(skip(self), fields(source = %self.name, path = %path.display()))]
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let absolute = self.absolute_path(path)?;
        let data = tokio::fs::read(&absolute).await.map_err(|e| exn::Exn::from(ErrorKind::from_io(e, path)))?;
        tracing::debug!(bytes = data.len(), "Read document");
        Ok(data)
    }
}
