//! Splitting text into highlighted and plain segments for search results.

use crate::fold::{Folded, Needle};
use serde::Serialize;

/// A contiguous run of text, tagged with whether it matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlight: bool,
}
impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self { text, highlight: false }
    }

    pub fn matched(text: &'a str) -> Self {
        Self { text, highlight: true }
    }
}

/// Partition `text` around every case-insensitive occurrence of `query`.
///
/// Matches are found greedily left to right and never overlap. Highlighted
/// segments keep the original casing of `text`. Concatenating the returned
/// segments always reproduces `text`; an empty `text`, an empty `query` or
/// no match at all yields a single plain segment.
///
/// # Examples
///
/// ```
/// use folio_catalog::{Segment, highlight_match};
///
/// assert_eq!(
///     highlight_match("The Hunger Games", "hun"),
///     [Segment::plain("The "), Segment::matched("Hun"), Segment::plain("ger Games")],
/// );
/// assert_eq!(highlight_match("Dune", ""), [Segment::plain("Dune")]);
/// ```
pub fn highlight_match<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let Some(needle) = Needle::new(query).filter(|_| !text.is_empty()) else {
        return vec![Segment::plain(text)];
    };
    let folded = Folded::new(text);
    let mut segments = Vec::new();
    // `last` indexes `text`; `cursor` indexes the folded copy.
    let mut last = 0;
    let mut cursor = 0;
    while let Some(found) = folded.as_str()[cursor..].find(needle.as_str()) {
        let start = folded.original_floor(cursor + found);
        let end = folded.original_ceil(cursor + found + needle.as_str().len());
        if start > last {
            segments.push(Segment::plain(&text[last..start]));
        }
        segments.push(Segment::matched(&text[start..end]));
        last = end;
        cursor = folded.folded_at(end);
    }
    if segments.is_empty() {
        return vec![Segment::plain(text)];
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}
