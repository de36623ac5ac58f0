//! Case folding shared by search, highlighting and author collation.
//!
//! Folding is done per character (`char::to_lowercase`), so every folded
//! byte can be traced back to the original character that produced it.
//! That mapping is what lets highlighting slice the *original* text even
//! when lowercasing changes a character's byte length.

/// Lowercase `s` one character at a time.
pub(crate) fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// A non-empty, case-folded search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle(String);
impl Needle {
    /// `None` for an empty query: an empty query matches nothing.
    pub fn new(query: &str) -> Option<Self> {
        match query.is_empty() {
            true => None,
            false => Some(Self(fold_case(query))),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring containment.
    pub fn is_in(&self, haystack: &str) -> bool {
        fold_case(haystack).contains(self.as_str())
    }
}

/// A folded copy of a string that remembers where each original character
/// landed.
pub(crate) struct Folded<'a> {
    original: &'a str,
    folded: String,
    /// `(folded_offset, original_offset)` of every original character, in order.
    starts: Vec<(usize, usize)>,
}
impl<'a> Folded<'a> {
    pub(crate) fn new(original: &'a str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut starts = Vec::with_capacity(original.len());
        for (offset, ch) in original.char_indices() {
            starts.push((folded.len(), offset));
            folded.extend(ch.to_lowercase());
        }
        Self { original, folded, starts }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.folded
    }

    /// Index into `starts` of the character whose folded form contains `at`.
    fn containing(&self, at: usize) -> usize {
        self.starts.partition_point(|(folded, _)| *folded <= at).saturating_sub(1)
    }

    /// Original offset of the character whose folded form contains `at`.
    pub(crate) fn original_floor(&self, at: usize) -> usize {
        self.starts.get(self.containing(at)).map_or(0, |(_, original)| *original)
    }

    /// Original offset of the first character boundary at or after folded
    /// offset `at`.
    pub(crate) fn original_ceil(&self, at: usize) -> usize {
        if at >= self.folded.len() {
            return self.original.len();
        }
        let index = self.containing(at);
        match self.starts[index] {
            (folded, original) if folded == at => original,
            _ => self.starts.get(index + 1).map_or(self.original.len(), |(_, original)| *original),
        }
    }

    /// Folded offset of the character starting at original offset `at`.
    pub(crate) fn folded_at(&self, at: usize) -> usize {
        match self.starts.binary_search_by_key(&at, |(_, original)| *original) {
            Ok(index) => self.starts[index].0,
            Err(_) => self.folded.len(),
        }
    }
}
