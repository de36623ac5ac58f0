//! Narrowing the book list by author and publication year.

use crate::models::Book;

/// Filters selected on the catalog's filter panel.
///
/// An empty author list accepts any author. Year bounds are inclusive; a
/// book without a first-publication year fails any bound that is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub authors: Vec<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}
impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.year_min.is_none() && self.year_max.is_none()
    }

    /// Add `author` if absent, remove it if present.
    pub fn toggle_author(&mut self, author: impl AsRef<str>) {
        let author = author.as_ref();
        match self.authors.iter().position(|a| a == author) {
            Some(index) => {
                self.authors.remove(index);
            },
            None => self.authors.push(author.to_string()),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let author_ok = self.authors.is_empty()
            || book.author_name().is_some_and(|name| self.authors.iter().any(|a| a == name));
        let year_ok = match (self.year_min, self.year_max) {
            (None, None) => true,
            (min, max) => book
                .first_published
                .is_some_and(|year| min.is_none_or(|min| year >= min) && max.is_none_or(|max| year <= max)),
        };
        author_ok && year_ok
    }

    /// The books that pass the filter, in their original order.
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|book| self.matches(book)).collect()
    }
}
