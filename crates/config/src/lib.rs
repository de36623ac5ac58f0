//! Layered configuration for folio.
//!
//! Values are merged, lowest priority first, from:
//!
//! 1. compiled defaults,
//! 2. an optional config file (`.toml`, `.json`, `.yaml`/`.yml`),
//! 3. `FOLIO_`-prefixed environment variables, with `__` separating nested
//!    keys (`FOLIO_HISTORY__CAPACITY=20`, `FOLIO_CATALOG__SOURCE__KIND=http`).

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "FOLIO_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub state: StateConfig,
    pub history: HistoryConfig,
}

/// Where the catalog documents come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    /// Path of the books document, relative to the source.
    pub books: PathBuf,
    /// Path of the series document, relative to the source.
    pub series: PathBuf,
}
impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            books: PathBuf::from("data/books.json"),
            series: PathBuf::from("data/series.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// A directory on disk. Relative roots resolve against the working
    /// directory.
    Local { root: PathBuf },
    /// A web server; documents are fetched with `GET <base_url>/<path>`.
    Http { base_url: String },
}
impl Default for SourceConfig {
    fn default() -> Self {
        Self::Local { root: PathBuf::from("public") }
    }
}

/// Where session state (role, theme, past searches, filters) is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub path: PathBuf,
    /// Keep state in memory only; nothing survives a restart.
    pub ephemeral: bool,
    /// Read persisted state but never write it back.
    pub read_only: bool,
}
impl Default for StateConfig {
    fn default() -> Self {
        let path = directories::ProjectDirs::from("org", "openlibrary", "folio")
            .map(|dirs| dirs.data_dir().join("state.json"))
            .unwrap_or_else(|| PathBuf::from(".folio/state.json"));
        Self { path, ephemeral: false, read_only: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of past searches remembered.
    pub capacity: usize,
}
impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 10 }
    }
}

impl Config {
    /// Load configuration from defaults, `file` (if given) and the
    /// environment, then validate it.
    ///
    /// # Errors
    ///
    /// - [`UnsupportedFormat`](ErrorKind::UnsupportedFormat) if `file` has an
    ///   unrecognized extension.
    /// - [`Load`](ErrorKind::Load) if `file` is missing or unparseable, or a
    ///   value has the wrong type.
    /// - [`InvalidValue`](ErrorKind::InvalidValue) if validation fails.
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = match file.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file_exact(file)),
                Some("json") => figment.merge(Json::file_exact(file)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(file)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(file.to_path_buf())),
            };
        }
        let config: Config = figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Check constraints the types alone can't express.
    pub fn validate(&self) -> Result<()> {
        if self.history.capacity == 0 {
            exn::bail!(ErrorKind::InvalidValue {
                field: "history.capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if let SourceConfig::Http { base_url } = &self.catalog.source
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            exn::bail!(ErrorKind::InvalidValue {
                field: "catalog.source.base_url",
                reason: format!("expected an http(s) URL, got {base_url:?}"),
            });
        }
        for (field, path) in [("catalog.books", &self.catalog.books), ("catalog.series", &self.catalog.series)] {
            if path.as_os_str().is_empty() || path.is_absolute() {
                exn::bail!(ErrorKind::InvalidValue {
                    field,
                    reason: format!("expected a relative document path, got {:?}", path.display().to_string()),
                });
            }
        }
        Ok(())
    }
}
