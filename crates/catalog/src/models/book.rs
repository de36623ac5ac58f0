use serde::{Deserialize, Serialize};

/// A book as published in the catalog's book document.
///
/// Books carry no identity of their own; two books are equal when every
/// field is equal. Missing or `null` `title`/`author` fields deserialize as
/// empty strings so one incomplete record doesn't fail the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub author: String,
    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_published: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}
impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    pub fn with_first_published(mut self, year: i32) -> Self {
        self.first_published = Some(year);
        self
    }

    /// The author's name as used for indexing: trimmed, `None` when blank.
    pub fn author_name(&self) -> Option<&str> {
        Some(self.author.trim()).filter(|name| !name.is_empty())
    }
}
