use feruca::Collator;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::Book;

/// An author derived from the book collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    /// Number of books whose trimmed author field equals `name`. Always ≥ 1.
    pub book_count: usize,
}
impl Author {
    /// Build the author index for `books`: one entry per distinct trimmed,
    /// non-blank author name, ordered by name.
    ///
    /// Names are ordered with the Unicode Collation Algorithm (root locale),
    /// so "Émile Zola" sorts among the Es and "de Lint" among the Ds.
    /// Names that collate equal fall back to code point order.
    pub fn index(books: &[Book]) -> Vec<Self> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for name in books.iter().filter_map(Book::author_name) {
            *counts.entry(name).or_default() += 1;
        }
        let mut authors: Vec<Self> = counts
            .into_iter()
            .map(|(name, book_count)| Self { name: name.to_string(), book_count })
            .collect();
        let mut collator = Collator::default();
        authors.sort_by(|a, b| {
            collator
                .collate(a.name.as_str(), b.name.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        authors
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.book_count {
            1 => write!(f, "{} (1 book)", self.name),
            n => write!(f, "{} ({n} books)", self.name),
        }
    }
}
