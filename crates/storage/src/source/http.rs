//! HTTP document source.
//!
//! Fetches documents relative to a base URL, the way the catalog pages fetch
//! their static JSON data from wherever the site is deployed.

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use crate::source::DocumentSource;
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::{Client, StatusCode};
use std::path::Path;
use tracing::instrument;

/// HTTP(S) document source.
///
/// A `404 Not Found` maps to [`NotFound`](ErrorKind::NotFound); any other
/// unsuccessful status or transport failure is a retryable
/// [`Network`](ErrorKind::Network) error.
#[derive(Clone, Debug)]
pub struct HttpSource {
    name: String,
    base: String,
    client: Client,
}
impl HttpSource {
    /// Create a source rooted at `base_url` (a trailing slash is optional).
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let base = base_url.into();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            exn::bail!(ErrorKind::BackendError(format!("unsupported base URL `{base}`")));
        }
        let client = Client::builder()
            .build()
            .or_raise(|| ErrorKind::BackendError("could not construct HTTP client".to_string()))?;
        Ok(Self {
            name: name.into(),
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &Path) -> Result<String> {
        let validated = validate_path(path)?;
        let segments: Vec<_> = validated.iter().map(|s| s.to_string_lossy()).collect();
        Ok(format!("{}/{}", self.base, segments.join("/")))
    }

    async fn get(&self, path: &Path) -> Result<reqwest::Response> {
        let url = self.url(path)?;
        let response = self.client.get(&url).send().await.map_err(|e| exn::Exn::from(ErrorKind::Network(e.to_string())))?;
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => exn::bail!(ErrorKind::PermissionDenied(path.to_path_buf())),
            status => exn::bail!(ErrorKind::Network(format!("unexpected status {status} for {url}"))),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        match self.get(path).await {
            Ok(_) => Ok(true),
            Err(err) if matches!(&*err, ErrorKind::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self), fields(source = %self.name, path = %path.display()))]
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let response = self.get(path).await?;
        let body = response.bytes().await.map_err(|e| exn::Exn::from(ErrorKind::Network(e.to_string())))?;
        tracing::debug!(bytes = body.len(), "Fetched document");
        Ok(body.to_vec())
    }
}
