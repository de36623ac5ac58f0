//! Client-side core of the book catalog.
//!
//! [`Services`] wires the catalog, session state and storage together once
//! at startup; UI code then drives a [`SearchSession`] per search modal and
//! uses [`folio_interact`] for list interaction. The member crates are
//! re-exported for convenience.

pub mod error;
mod search;
mod services;

pub use crate::search::{Category, Outcome, SearchResult, SearchSession, Status};
pub use crate::services::Services;
pub use folio_catalog as catalog;
pub use folio_config as config;
pub use folio_interact as interact;
pub use folio_session as session;
pub use folio_storage as storage;
