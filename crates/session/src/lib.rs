//! Session state that outlives a page view.
//!
//! Everything here is persisted through a [`KeyValueStore`](folio_storage::KeyValueStore),
//! each component under its own keys (see [`keys`]). Corrupt or unrecognized
//! persisted values are never errors: they are logged and replaced with the
//! default state.

pub mod error;
mod filters;
mod history;
pub mod keys;
mod role;
mod toggle;

pub use crate::filters::{FilterBar, Format, Selection};
pub use crate::history::{DEFAULT_CAPACITY, PastSearchLog};
pub use crate::role::{Role, RoleState, Theme, ThemeState};
pub use crate::toggle::{Change, Subscription, Toggle, TwoValued};
