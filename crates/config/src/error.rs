//! Config Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The layered configuration could not be read or did not match the
    /// expected shape. The underlying figment error is attached as a child.
    #[display("failed to load configuration")]
    Load,
    /// The config file's extension is not one of toml, json, yaml or yml.
    #[display("unsupported config file format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// A value parsed fine but is not allowed.
    #[display("invalid value for {field}: {reason}")]
    InvalidValue {
        #[error(not(source))]
        field: &'static str,
        #[error(not(source))]
        reason: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Load | Self::UnsupportedFormat(_) | Self::InvalidValue { .. } => false,
        }
    }
}
