//! Application Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Each variant names the layer that failed; the
//! underlying crate's error is attached as a child.

use derive_more::{Display, Error};

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The configured catalog source could not be set up.
    #[display("catalog source unavailable")]
    Source,
    /// The configured state store could not be opened.
    #[display("state store unavailable")]
    State,
    /// The configuration asks for an HTTP source but the `http` feature is
    /// not compiled in.
    #[display("http catalog sources require the `http` feature")]
    HttpDisabled,
    /// The catalog failed to load.
    #[display("catalog failed to load")]
    Catalog,
    /// Session state could not be written.
    #[display("session state could not be saved")]
    Session,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Catalog | Self::Session)
    }
}
