//! The catalog: loaded once, searched many times.

use crate::error::{Error, ErrorKind, Result};
use crate::fold::Needle;
use crate::models::{Author, Book, Series};
use folio_storage::SourceHandle;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::instrument;

/// Output of a load shared by every caller waiting on it.
type PendingLoad = Shared<BoxFuture<'static, std::result::Result<Arc<Snapshot>, ErrorKind>>>;

/// Where the two catalog documents live within the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documents {
    pub books: PathBuf,
    pub series: PathBuf,
}
impl Default for Documents {
    fn default() -> Self {
        Self {
            books: PathBuf::from("data/books.json"),
            series: PathBuf::from("data/series.json"),
        }
    }
}

/// Everything known about the catalog after a successful load. Immutable.
#[derive(Debug, Default)]
struct Snapshot {
    books: Vec<Book>,
    authors: Vec<Author>,
    series: Vec<Series>,
}
impl Snapshot {
    fn new(books: Vec<Book>, series: Vec<Series>) -> Self {
        let authors = Author::index(&books);
        Self { books, authors, series }
    }
}

/// Load progress shared between the catalog and its in-flight load.
#[derive(Default)]
struct LoadState {
    snapshot: OnceLock<Arc<Snapshot>>,
    loading: Mutex<Option<PendingLoad>>,
}

/// The book catalog.
///
/// Construct one per application and share it (it is `Send + Sync`). Data is
/// fetched from the [`DocumentSource`](folio_storage::DocumentSource) at most
/// once per successful load; there is no refresh.
///
/// Searches never trigger a load. Before [`ensure_loaded`](Self::ensure_loaded)
/// has succeeded every query returns nothing, so use
/// [`is_loaded`](Self::is_loaded) to tell "no data" apart from "no results".
pub struct Catalog {
    source: SourceHandle,
    documents: Documents,
    state: Arc<LoadState>,
}

impl Catalog {
    pub fn new(source: SourceHandle, documents: Documents) -> Self {
        Self {
            source,
            documents,
            state: Arc::new(LoadState::default()),
        }
    }

    /// Fetch and index the catalog unless that has already happened.
    ///
    /// Concurrent callers share a single in-flight load: the documents are
    /// requested once and every caller observes the same outcome. Both
    /// documents must load for anything to be cached; after a failure the
    /// next call starts over.
    ///
    /// Inside a Tokio runtime the load also runs on its own task, so a caller
    /// that stops waiting doesn't stall it: the catalog still fills in for
    /// everyone else. Without a runtime the load only advances while someone
    /// awaits it.
    ///
    /// # Errors
    ///
    /// [`DataUnavailable`](ErrorKind::DataUnavailable) if either document
    /// can't be fetched or parsed.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            return Ok(());
        }
        let pending = {
            let mut loading = self.state.loading.lock().unwrap_or_else(PoisonError::into_inner);
            if self.is_loaded() {
                return Ok(());
            }
            match loading.as_ref() {
                Some(pending) => {
                    tracing::debug!("Joining catalog load already in flight");
                    pending.clone()
                },
                None => {
                    let load = Self::load(self.source.clone(), self.documents.clone(), Arc::clone(&self.state));
                    let pending = load.boxed().shared();
                    *loading = Some(pending.clone());
                    if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                        runtime.spawn(pending.clone());
                    }
                    pending
                },
            }
        };
        pending.await.map(|_| ()).map_err(Error::from)
    }

    /// Fetch both documents, then commit the outcome before anyone waiting
    /// on this load is released.
    async fn load(
        source: SourceHandle,
        documents: Documents,
        state: Arc<LoadState>,
    ) -> std::result::Result<Arc<Snapshot>, ErrorKind> {
        let outcome = Self::fetch_all(source, documents).await;
        {
            let mut loading = state.loading.lock().unwrap_or_else(PoisonError::into_inner);
            // Commit before clearing the pending load, so no caller can see
            // neither and start a second fetch.
            if let Ok(snapshot) = &outcome {
                _ = state.snapshot.set(Arc::clone(snapshot));
            }
            *loading = None;
        }
        outcome
    }

    async fn fetch_all(source: SourceHandle, documents: Documents) -> std::result::Result<Arc<Snapshot>, ErrorKind> {
        let (books, series) = futures::try_join!(
            Self::fetch::<Vec<Book>>(&source, &documents.books),
            Self::fetch::<Vec<Series>>(&source, &documents.series),
        )?;
        let snapshot = Snapshot::new(books, series);
        tracing::info!(
            books = snapshot.books.len(),
            authors = snapshot.authors.len(),
            series = snapshot.series.len(),
            "Catalog loaded"
        );
        Ok(Arc::new(snapshot))
    }

    async fn fetch<T: DeserializeOwned>(source: &SourceHandle, path: &Path) -> std::result::Result<T, ErrorKind> {
        let unavailable = |reason: String| ErrorKind::DataUnavailable {
            document: path.to_path_buf(),
            reason,
        };
        let bytes = source.read(path).await.map_err(|err| {
            tracing::warn!(path = %path.display(), error = ?err, "Failed to fetch catalog document");
            unavailable((*err).to_string())
        })?;
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "Catalog document is not valid");
            unavailable(err.to_string())
        })
    }

    /// Whether a load has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.state.snapshot.get().is_some()
    }

    fn snapshot(&self) -> Option<&Snapshot> {
        self.state.snapshot.get().map(Arc::as_ref)
    }

    /// All books, in document order. Empty before load.
    pub fn books(&self) -> &[Book] {
        self.snapshot().map_or(&[], |s| s.books.as_slice())
    }

    /// All authors, ordered by name. Empty before load.
    pub fn authors(&self) -> &[Author] {
        self.snapshot().map_or(&[], |s| s.authors.as_slice())
    }

    /// All series, in document order. Empty before load.
    pub fn series(&self) -> &[Series] {
        self.snapshot().map_or(&[], |s| s.series.as_slice())
    }

    /// Books whose title or author contains `query`, ignoring case, in
    /// document order.
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        search(self.books(), query, |book, needle| needle.is_in(&book.title) || needle.is_in(&book.author))
    }

    /// Authors whose name contains `query`, ignoring case, in author order.
    pub fn search_authors(&self, query: &str) -> Vec<&Author> {
        search(self.authors(), query, |author, needle| needle.is_in(&author.name))
    }

    /// Series whose title contains `query`, ignoring case, in document order.
    pub fn search_series(&self, query: &str) -> Vec<&Series> {
        search(self.series(), query, |series, needle| needle.is_in(&series.title))
    }
}

fn search<'a, T>(items: &'a [T], query: &str, matches: impl Fn(&T, &Needle) -> bool) -> Vec<&'a T> {
    match Needle::new(query) {
        Some(needle) => items.iter().filter(|item| matches(item, &needle)).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_storage::source::{DocumentSource, MockSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    const BOOKS: &str = r#"[
        {"title": "The Hunger Games", "author": "Suzanne Collins", "firstPublished": 2008},
        {"title": "Catching Fire", "author": "Suzanne Collins", "firstPublished": 2009},
        {"title": "Station Eleven", "author": "Emily St. John Mandel"},
        {"title": "A Wizard of Earthsea", "author": " Ursula K. Le Guin "},
        {"title": "Unattributed Pamphlet", "author": ""}
    ]"#;
    const SERIES: &str = r#"[
        {"title": "The Hunger Games Trilogy", "books": 3},
        {"title": "Earthsea Cycle"}
    ]"#;

    fn mock() -> Arc<MockSource> {
        Arc::new(MockSource::with_documents([("data/books.json", BOOKS), ("data/series.json", SERIES)]))
    }

    fn catalog(source: Arc<MockSource>) -> Catalog {
        Catalog::new(source, Documents::default())
    }

    async fn loaded() -> Catalog {
        let catalog = catalog(mock());
        catalog.ensure_loaded().await.unwrap();
        catalog
    }

    /// Holds every read until the gate opens, so concurrent callers really do
    /// overlap with an in-flight load.
    struct GatedSource {
        inner: Arc<MockSource>,
        gate: Semaphore,
        started: AtomicUsize,
    }
    impl GatedSource {
        fn new(inner: Arc<MockSource>) -> Self {
            Self { inner, gate: Semaphore::new(0), started: AtomicUsize::new(0) }
        }

        async fn open_after_yield(&self) {
            tokio::task::yield_now().await;
            self.gate.add_permits(2);
        }
    }

    #[async_trait::async_trait]
    impl DocumentSource for GatedSource {
        fn name(&self) -> &str {
            "gated"
        }

        async fn exists(&self, path: &Path) -> folio_storage::error::Result<bool> {
            self.inner.exists(path).await
        }

        async fn read(&self, path: &Path) -> folio_storage::error::Result<Vec<u8>> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let _permit = self.gate.acquire().await.unwrap();
            self.inner.read(path).await
        }
    }

    #[tokio::test]
    async fn test_empty_before_load() {
        let source = mock();
        let catalog = catalog(source.clone());
        assert!(!catalog.is_loaded());
        assert!(catalog.books().is_empty());
        assert!(catalog.authors().is_empty());
        assert!(catalog.series().is_empty());
        assert!(catalog.search_books("hun").is_empty());
        // Searching never loads implicitly.
        assert_eq!(source.reads("data/books.json"), 0);
    }

    #[tokio::test]
    async fn test_load_derives_authors() {
        let catalog = loaded().await;
        assert!(catalog.is_loaded());
        assert_eq!(catalog.books().len(), 5);
        assert_eq!(catalog.series().len(), 2);
        let authors: Vec<_> = catalog.authors().iter().map(|a| (a.name.as_str(), a.book_count)).collect();
        assert_eq!(
            authors,
            [("Emily St. John Mandel", 1), ("Suzanne Collins", 2), ("Ursula K. Le Guin", 1)]
        );
    }

    #[tokio::test]
    async fn test_search_books_matches_title_or_author() {
        let catalog = loaded().await;
        let titles: Vec<_> = catalog.search_books("hun").into_iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["The Hunger Games"]);
        let titles: Vec<_> = catalog.search_books("COLLINS").into_iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["The Hunger Games", "Catching Fire"]);
        assert!(catalog.search_books("").is_empty());
        assert!(catalog.search_books("zzz").is_empty());
    }

    #[tokio::test]
    async fn test_search_authors_keeps_author_order() {
        let catalog = loaded().await;
        let names: Vec<_> = catalog.search_authors("an").into_iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Emily St. John Mandel", "Suzanne Collins"]);
        let names: Vec<_> = catalog.search_authors("l").into_iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Emily St. John Mandel", "Suzanne Collins", "Ursula K. Le Guin"]);
        let names: Vec<_> = catalog.search_authors("le gu").into_iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Ursula K. Le Guin"]);
    }

    #[tokio::test]
    async fn test_search_series() {
        let catalog = loaded().await;
        let titles: Vec<_> = catalog.search_series("earthsea").into_iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Earthsea Cycle"]);
        assert!(catalog.search_series("").is_empty());
    }

    #[tokio::test]
    async fn test_loads_only_once() {
        let source = mock();
        let catalog = catalog(source.clone());
        catalog.ensure_loaded().await.unwrap();
        catalog.ensure_loaded().await.unwrap();
        assert_eq!(source.reads("data/books.json"), 1);
        assert_eq!(source.reads("data/series.json"), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_fetch() {
        let inner = mock();
        let gated = Arc::new(GatedSource::new(inner.clone()));
        let catalog = Catalog::new(gated.clone(), Documents::default());
        let (a, b, c, ()) = futures::join!(
            catalog.ensure_loaded(),
            catalog.ensure_loaded(),
            catalog.ensure_loaded(),
            gated.open_after_yield(),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(gated.started.load(Ordering::SeqCst), 2);
        assert_eq!(inner.reads("data/books.json"), 1);
        assert_eq!(inner.reads("data/series.json"), 1);
        assert_eq!(catalog.books().len(), 5);
    }

    #[tokio::test]
    async fn test_abandoned_load_still_completes() {
        let inner = mock();
        let gated = Arc::new(GatedSource::new(inner.clone()));
        let catalog = Catalog::new(gated.clone(), Documents::default());

        let mut first = Box::pin(catalog.ensure_loaded());
        assert!(futures::poll!(first.as_mut()).is_pending());
        drop(first);

        gated.gate.add_permits(2);
        for _ in 0..50 {
            if catalog.is_loaded() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(catalog.is_loaded());
        assert_eq!(catalog.books().len(), 5);

        catalog.ensure_loaded().await.unwrap();
        assert_eq!(inner.reads("data/books.json"), 1);
    }

    #[tokio::test]
    async fn test_concurrent_failure_is_shared_then_retried() {
        let inner = mock();
        inner.fail("data/series.json", "connection reset");
        let gated = Arc::new(GatedSource::new(inner.clone()));
        let catalog = Catalog::new(gated.clone(), Documents::default());

        let (a, b, c, ()) = futures::join!(
            catalog.ensure_loaded(),
            catalog.ensure_loaded(),
            catalog.ensure_loaded(),
            gated.open_after_yield(),
        );
        for result in [a, b, c] {
            let err = result.unwrap_err();
            assert!(matches!(&*err, ErrorKind::DataUnavailable { document, .. } if document == Path::new("data/series.json")));
        }
        assert_eq!(inner.reads("data/series.json"), 1);
        // Books arrived but nothing was committed.
        assert!(!catalog.is_loaded());
        assert!(catalog.books().is_empty());

        inner.heal("data/series.json");
        gated.gate.add_permits(2);
        catalog.ensure_loaded().await.unwrap();
        assert_eq!(inner.reads("data/books.json"), 2);
        assert_eq!(inner.reads("data/series.json"), 2);
        assert_eq!(catalog.series().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_document_fails_load() {
        let source = Arc::new(MockSource::with_documents([("data/books.json", "{\"not\": \"a list\"}"), ("data/series.json", "[]")]));
        let catalog = catalog(source);
        let err = catalog.ensure_loaded().await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::DataUnavailable { document, .. } if document == Path::new("data/books.json")));
        assert!(!catalog.is_loaded());
    }

    #[tokio::test]
    async fn test_null_fields_load_but_never_match() {
        let books = r#"[{"title": "Dune", "author": "Frank Herbert"}, {"title": "Anon", "author": null}, {"title": null, "author": "Nobody"}]"#;
        let series = r#"[{"title": null}, {"title": "Dune Chronicles"}]"#;
        let source = Arc::new(MockSource::with_documents([("data/books.json", books), ("data/series.json", series)]));
        let catalog = catalog(source);
        catalog.ensure_loaded().await.unwrap();
        assert_eq!(catalog.books().len(), 3);
        let names: Vec<_> = catalog.authors().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Frank Herbert", "Nobody"]);
        let titles: Vec<_> = catalog.search_books("anon").into_iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Anon"]);
        let titles: Vec<_> = catalog.search_series("dune").into_iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Dune Chronicles"]);
    }

    #[tokio::test]
    async fn test_missing_document_fails_load() {
        let source = Arc::new(MockSource::with_documents([("data/books.json", "[]")]));
        let catalog = catalog(source);
        let err = catalog.ensure_loaded().await.unwrap_err();
        assert!(err.is_retryable());
        assert!((*err).to_string().contains("data/series.json"));
    }

    #[tokio::test]
    async fn test_custom_document_paths() {
        let source = Arc::new(MockSource::with_documents([("v2/books.json", BOOKS), ("v2/series.json", "[]")]));
        let documents = Documents {
            books: PathBuf::from("v2/books.json"),
            series: PathBuf::from("v2/series.json"),
        };
        let catalog = Catalog::new(source, documents);
        catalog.ensure_loaded().await.unwrap();
        assert_eq!(catalog.books().len(), 5);
    }
}
