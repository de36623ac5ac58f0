//! Search filter bar preferences.

use crate::error::{ErrorKind, Result};
use crate::keys;
use derive_more::Display;
use exn::ResultExt;
use folio_storage::StoreHandle;

/// Which editions to show.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    #[display("all")]
    All,
    #[display("read")]
    Read,
    #[display("listen")]
    Listen,
}
impl Format {
    pub const ALL: [Format; 3] = [Format::All, Format::Read, Format::Listen];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Read => "read",
            Self::Listen => "listen",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.as_str() == value)
    }
}

/// A snapshot of every filter, handed to whoever runs the search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub format: Format,
    pub available_now: bool,
    pub subjects: Vec<String>,
    pub language: Option<String>,
}

/// The filter chips above search results.
///
/// Format, "available now" and language survive restarts; subjects last for
/// the session only. Every mutator persists immediately and returns the new
/// [`Selection`].
pub struct FilterBar {
    store: StoreHandle,
    selection: Selection,
}

impl FilterBar {
    /// Restore persisted preferences. Unrecognized values fall back to their
    /// defaults.
    pub fn load(store: StoreHandle) -> Self {
        let format = match read(&store, keys::FILTER_FORMAT) {
            Some(raw) => Format::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unrecognized filter format; using default");
                Format::default()
            }),
            None => Format::default(),
        };
        let available_now = read(&store, keys::FILTER_AVAILABLE_NOW).is_some_and(|raw| raw == "true");
        let language = read(&store, keys::FILTER_LANGUAGE).filter(|raw| !raw.is_empty());
        Self {
            store,
            selection: Selection { format, available_now, subjects: Vec::new(), language },
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_format(&mut self, format: Format) -> Result<Selection> {
        self.selection.format = format;
        self.persist(keys::FILTER_FORMAT, Some(format.as_str()))?;
        Ok(self.selection.clone())
    }

    pub fn toggle_available_now(&mut self) -> Result<Selection> {
        self.selection.available_now = !self.selection.available_now;
        let value = if self.selection.available_now { "true" } else { "false" };
        self.persist(keys::FILTER_AVAILABLE_NOW, Some(value))?;
        Ok(self.selection.clone())
    }

    /// Select `language`, or clear the language filter if it is already the
    /// active one.
    pub fn select_language(&mut self, language: &str) -> Result<Selection> {
        let language = match self.selection.language.as_deref() == Some(language) || language.is_empty() {
            true => None,
            false => Some(language.to_string()),
        };
        self.persist(keys::FILTER_LANGUAGE, language.as_deref())?;
        self.selection.language = language;
        Ok(self.selection.clone())
    }

    /// Add `subject` if absent, remove it if present. Not persisted.
    pub fn toggle_subject(&mut self, subject: &str) -> Selection {
        let subjects = &mut self.selection.subjects;
        match subjects.iter().position(|s| s == subject) {
            Some(index) => {
                subjects.remove(index);
            },
            None => subjects.push(subject.to_string()),
        }
        self.selection.clone()
    }

    /// Reset every filter and forget the persisted preferences.
    pub fn clear_all(&mut self) -> Result<Selection> {
        self.selection = Selection::default();
        for key in [keys::FILTER_FORMAT, keys::FILTER_AVAILABLE_NOW, keys::FILTER_LANGUAGE] {
            self.persist(key, None)?;
        }
        Ok(self.selection.clone())
    }

    pub fn has_active_filters(&self) -> bool {
        self.selection != Selection::default()
    }

    fn persist(&self, key: &'static str, value: Option<&str>) -> Result<()> {
        tracing::debug!(key, value, "Persisting filter preference");
        match value {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        }
        .or_raise(|| ErrorKind::Storage(key))
    }
}

fn read(store: &StoreHandle, key: &str) -> Option<String> {
    store.get(key).unwrap_or_else(|err| {
        tracing::warn!(key, error = ?err, "Could not read filter preference");
        None
    })
}
