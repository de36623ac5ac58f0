//! Document sources for catalog data.
//!
//! A [`DocumentSource`] hands out the raw bytes of the catalog's JSON
//! documents. The catalog never cares where those bytes come from: a
//! directory on disk, an HTTP server or (in tests) memory.

#[cfg(feature = "http")]
mod http;
mod local;
#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "http")]
pub use self::http::HttpSource;
pub use self::local::LocalSource;
#[cfg(feature = "mock")]
pub use self::mock::MockSource;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Read-only access to named documents.
///
/// All paths are relative to the source root and are validated with
/// [`validate_path`](crate::validate_path) by every implementation before
/// use.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use folio_storage::{source::DocumentSource, error::Result};
///
/// async fn books_json(source: &dyn DocumentSource) -> Result<Option<Vec<u8>>> {
///     let path = Path::new("data/books.json");
///     if source.exists(path).await? {
///         Ok(Some(source.read(path).await?))
///     } else {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Name of the configured source. Used for logging only.
    fn name(&self) -> &str;

    /// Check if a document exists.
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Read a document's complete contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the
    /// document does not exist.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
}
