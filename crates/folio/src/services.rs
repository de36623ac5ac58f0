use crate::error::{ErrorKind, Result};
use crate::search::SearchSession;
use exn::ResultExt;
use folio_catalog::{Catalog, Documents};
use folio_config::{Config, SourceConfig};
use folio_session::{FilterBar, PastSearchLog, RoleState, ThemeState};
use folio_storage::kv::{FileStore, MemoryStore, ReadOnlyStore};
use folio_storage::source::LocalSource;
use folio_storage::{SourceHandle, StoreHandle};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// The application's single set of shared services.
///
/// Build once at startup and hand out references (or clone the `Arc`s) to
/// whatever needs them. Role and theme toggles are shared so that every
/// subscriber sees the same state.
pub struct Services {
    pub catalog: Arc<Catalog>,
    pub history: Arc<PastSearchLog>,
    pub roles: Arc<RoleState>,
    pub themes: Arc<ThemeState>,
    pub filters: FilterBar,
}

impl Services {
    /// Wire services over an explicit source and store, reading the catalog
    /// from its default document paths.
    pub fn new(source: SourceHandle, store: StoreHandle, history_capacity: usize) -> Self {
        Self::assemble(source, Documents::default(), store, history_capacity)
    }

    /// Build the source and store described by `config` and wire services
    /// over them. The catalog is not loaded yet.
    #[instrument(skip_all)]
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = match &config.catalog.source {
            SourceConfig::Local { root } => local_source(root)?,
            SourceConfig::Http { base_url } => http_source(base_url)?,
        };
        let store: StoreHandle = match config.state.ephemeral {
            true => Arc::new(MemoryStore::default()),
            false => Arc::new(FileStore::open(&config.state.path).or_raise(|| ErrorKind::State)?),
        };
        let store: StoreHandle = match config.state.read_only {
            true => Arc::new(ReadOnlyStore::new(store)),
            false => store,
        };
        let documents = Documents {
            books: config.catalog.books.clone(),
            series: config.catalog.series.clone(),
        };
        tracing::info!(
            source = source.name(),
            ephemeral = config.state.ephemeral,
            read_only = config.state.read_only,
            "Services ready"
        );
        Ok(Self::assemble(source, documents, store, config.history.capacity))
    }

    fn assemble(source: SourceHandle, documents: Documents, store: StoreHandle, history_capacity: usize) -> Self {
        Self {
            catalog: Arc::new(Catalog::new(source, documents)),
            history: Arc::new(PastSearchLog::new(store.clone(), history_capacity)),
            roles: Arc::new(RoleState::load(store.clone())),
            themes: Arc::new(ThemeState::load(store.clone())),
            filters: FilterBar::load(store),
        }
    }

    /// A fresh search modal over the shared catalog and history.
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(Arc::clone(&self.catalog), Arc::clone(&self.history))
    }
}

fn local_source(root: &Path) -> Result<SourceHandle> {
    let root = match root.is_absolute() {
        true => root.to_path_buf(),
        false => std::env::current_dir().or_raise(|| ErrorKind::Source)?.join(root),
    };
    Ok(Arc::new(LocalSource::new("local", root).or_raise(|| ErrorKind::Source)?))
}

#[cfg(feature = "http")]
fn http_source(base_url: &str) -> Result<SourceHandle> {
    let source = folio_storage::source::HttpSource::new("http", base_url).or_raise(|| ErrorKind::Source)?;
    Ok(Arc::new(source))
}

#[cfg(not(feature = "http"))]
fn http_source(base_url: &str) -> Result<SourceHandle> {
    tracing::warn!(base_url, "HTTP catalog source configured without the `http` feature");
    exn::bail!(ErrorKind::HttpDisabled)
}
