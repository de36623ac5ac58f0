//! State behind the search modal.

use crate::error::{ErrorKind, Result};
use derive_more::Display;
use exn::ResultExt;
use folio_catalog::{Author, Book, Catalog, Segment, highlight_match};
use folio_interact::{Key, ListNavigator};
use folio_session::PastSearchLog;
use std::sync::Arc;
use tracing::instrument;

/// The tabs across the top of the search modal.
///
/// Only books and authors are backed by the catalog; the other tabs exist
/// in the UI but never produce results.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    #[display("books")]
    Books,
    #[display("authors")]
    Authors,
    #[display("search-inside")]
    SearchInside,
    #[display("subjects")]
    Subjects,
    #[display("lists")]
    Lists,
}
impl Category {
    pub const ALL: [Category; 5] = [Self::Books, Self::Authors, Self::SearchInside, Self::Subjects, Self::Lists];

    pub fn is_searchable(self) -> bool {
        matches!(self, Self::Books | Self::Authors)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Book(Book),
    Author(Author),
}
impl SearchResult {
    /// The text shown (and highlighted) for this result.
    pub fn label(&self) -> &str {
        match self {
            Self::Book(book) => &book.title,
            Self::Author(author) => &author.name,
        }
    }

    pub fn highlighted<'a>(&'a self, query: &str) -> Vec<Segment<'a>> {
        highlight_match(self.label(), query.trim())
    }
}

/// What the modal should show instead of (or above) its result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The catalog has not loaded (or failed to); results would be misleading.
    NotLoaded,
    /// The query is blank; show past searches instead.
    Empty,
    NoResults,
    Results(usize),
}

/// What pressing Enter led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The highlighted result was chosen.
    Selected(SearchResult),
    /// No result was highlighted; show the full results page for the query.
    SeeAll(String),
    /// Nothing to do (blank query, nothing highlighted).
    Nothing,
}

/// One open search modal.
///
/// Results are recomputed only by [`run_search`](Self::run_search) (and the
/// operations documented as running it), so callers are free to debounce
/// typing however they like.
pub struct SearchSession {
    catalog: Arc<Catalog>,
    history: Arc<PastSearchLog>,
    category: Category,
    query: String,
    results: Vec<SearchResult>,
    navigator: ListNavigator,
}

impl SearchSession {
    pub fn new(catalog: Arc<Catalog>, history: Arc<PastSearchLog>) -> Self {
        Self {
            catalog,
            history,
            category: Category::default(),
            query: String::new(),
            results: Vec::new(),
            navigator: ListNavigator::default(),
        }
    }

    /// Reset to a blank query and make sure the catalog is loaded.
    ///
    /// The session is usable even if loading fails: [`status`](Self::status)
    /// reports [`NotLoaded`](Status::NotLoaded) and a later `open` retries.
    #[instrument(skip(self))]
    pub async fn open(&mut self) -> Result<()> {
        self.query.clear();
        self.set_results(Vec::new());
        self.catalog.ensure_loaded().await.or_raise(|| ErrorKind::Catalog)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// The highlighted result, if any.
    pub fn active(&self) -> Option<&SearchResult> {
        self.navigator.active().and_then(|index| self.results.get(index))
    }

    /// Update the query text. Clears the highlight but leaves results alone
    /// until the next [`run_search`](Self::run_search).
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.navigator.reset(self.results.len());
    }

    /// Switch tabs and search again.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.run_search();
    }

    /// Recompute results for the current (trimmed) query and category.
    pub fn run_search(&mut self) {
        let query = self.query.trim();
        let results = match (query.is_empty(), self.category) {
            (true, _) => Vec::new(),
            (false, Category::Books) => self.catalog.search_books(query).into_iter().cloned().map(SearchResult::Book).collect(),
            (false, Category::Authors) => {
                self.catalog.search_authors(query).into_iter().cloned().map(SearchResult::Author).collect()
            },
            (false, _) => Vec::new(),
        };
        tracing::debug!(query, category = %self.category, results = results.len(), "Search ran");
        self.set_results(results);
    }

    fn set_results(&mut self, results: Vec<SearchResult>) {
        self.navigator.reset(results.len());
        self.results = results;
    }

    /// Move the highlight. Returns whether the key was used.
    pub fn handle_key(&mut self, key: Key) -> bool {
        self.navigator.handle(key)
    }

    pub fn status(&self) -> Status {
        if !self.catalog.is_loaded() {
            Status::NotLoaded
        } else if self.query.trim().is_empty() {
            Status::Empty
        } else if self.results.is_empty() {
            Status::NoResults
        } else {
            Status::Results(self.results.len())
        }
    }

    /// Choose the highlighted result, remembering the query.
    pub fn select_active(&mut self) -> Result<Option<SearchResult>> {
        let Some(result) = self.active().cloned() else {
            return Ok(None);
        };
        self.remember()?;
        Ok(Some(result))
    }

    /// Ask for the full results page, remembering the query. Returns the
    /// trimmed query, or `None` if it is blank.
    pub fn see_all(&mut self) -> Result<Option<String>> {
        let query = self.query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let query = query.to_string();
        self.remember()?;
        Ok(Some(query))
    }

    /// Enter: choose the highlighted result, or fall back to "see all".
    pub fn submit(&mut self) -> Result<Outcome> {
        if let Some(result) = self.select_active()? {
            return Ok(Outcome::Selected(result));
        }
        Ok(self.see_all()?.map_or(Outcome::Nothing, Outcome::SeeAll))
    }

    fn remember(&self) -> Result<()> {
        self.history.add(&self.query).or_raise(|| ErrorKind::Session)
    }

    /// Past searches to offer while the query is blank; empty otherwise.
    pub fn past_searches(&self) -> Vec<String> {
        match self.query.trim().is_empty() {
            true => self.history.list(),
            false => Vec::new(),
        }
    }

    /// Re-run a past search.
    pub fn use_past_search(&mut self, query: &str) {
        self.set_query(query);
        self.run_search();
    }

    pub fn forget_past_search(&self, query: &str) -> Result<()> {
        self.history.remove(query).or_raise(|| ErrorKind::Session)
    }
}
