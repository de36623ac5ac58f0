//! The book catalog as seen by the client.
//!
//! Two JSON documents (books and series) are fetched once from a
//! [`DocumentSource`](folio_storage::DocumentSource), an author index is
//! derived from the books, and everything is then searched in memory with
//! case-insensitive substring matching. [`highlight_match`] splits result
//! text around the query for display.

mod catalog;
pub mod error;
mod filter;
mod fold;
mod highlight;
pub mod models;

pub use crate::catalog::{Catalog, Documents};
pub use crate::filter::BookFilter;
pub use crate::fold::Needle;
pub use crate::highlight::{Segment, highlight_match};
pub use crate::models::{Author, Book, Series};
