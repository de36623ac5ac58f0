//! Where folio's data comes from and where its state goes.
//!
//! - [`source`]: read-only [`DocumentSource`]s serving the catalog's JSON
//!   documents (local directory, HTTP with the `http` feature, memory with
//!   the `mock` feature).
//! - [`kv`]: synchronous [`KeyValueStore`]s holding small pieces of session
//!   state (memory, a JSON file, or a read-only decorator).

pub mod error;
pub mod kv;
mod path;
pub mod source;

pub use crate::kv::KeyValueStore;
pub use crate::path::validate as validate_path;
pub use crate::source::DocumentSource;
use std::sync::Arc;

pub type SourceHandle = Arc<dyn DocumentSource + Send + Sync>;
pub type StoreHandle = Arc<dyn KeyValueStore + Send + Sync>;
