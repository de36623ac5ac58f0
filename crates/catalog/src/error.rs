//! Catalog Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// `Clone` because a single failed load is reported to every caller that was
/// waiting on it.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A catalog document could not be fetched or parsed. Nothing was cached,
    /// so calling [`ensure_loaded`](crate::Catalog::ensure_loaded) again
    /// re-attempts both documents.
    #[display("catalog data unavailable ({}): {reason}", document.display())]
    DataUnavailable {
        /// The document that failed.
        #[error(not(source))]
        document: PathBuf,
        /// Why it failed (transport or parse error).
        #[error(not(source))]
        reason: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The source may have been briefly unreachable; the caller decides.
        matches!(self, Self::DataUnavailable { .. })
    }
}
