//! Session Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Reads never fail (bad persisted state falls back to
//! defaults), so only writes surface here.

use derive_more::{Display, Error};

/// A session error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The key-value store rejected a write or delete.
    #[display("could not persist session state under key {_0:?}")]
    Storage(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
