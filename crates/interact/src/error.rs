//! Interaction Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// An interaction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for interaction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A reorder referenced a position outside the list. Callers are expected
    /// to clamp with [`compute_move`](crate::compute_move) first, so this
    /// points at a bug rather than bad input.
    #[display("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        #[error(not(source))]
        index: usize,
        #[error(not(source))]
        len: usize,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::IndexOutOfRange { .. } => false,
        }
    }
}
