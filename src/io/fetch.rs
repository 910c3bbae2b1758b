//! Retrieval of raw table text from disk or over HTTP.

use std::future::Future;
use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::domain::LoadConfig;
use crate::error::LoadError;

/// Text-fetch capability the loader depends on.
pub trait TextFetch {
    /// Return the full text behind `location`, or `SourceUnavailable`.
    fn fetch(&self, location: &str) -> impl Future<Output = Result<String, LoadError>> + Send;
}

/// Resolves a source location the way the web front-end would.
///
/// - `http://` / `https://` locations are fetched directly.
/// - Other locations are appended to `base_url` when one is configured.
/// - Otherwise they are read from disk below `data_root` (a leading `/` is
///   relative to the root, like a web server's document root).
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: Client,
    data_root: PathBuf,
    base_url: Option<String>,
}

impl SourceFetcher {
    pub fn new(data_root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            data_root: data_root.into(),
            base_url,
        }
    }

    pub fn from_config(config: &LoadConfig) -> Self {
        Self::new(config.data_root.clone(), config.base_url.clone())
    }

    fn resolve(&self, location: &str) -> Resolved {
        if is_http(location) {
            return Resolved::Url(location.to_string());
        }
        if let Some(base) = &self.base_url {
            return Resolved::Url(join_url(base, location));
        }
        Resolved::File(resolve_path(&self.data_root, location))
    }

    async fn fetch_url(&self, url: &str) -> Result<String, LoadError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::unavailable(url, e))?;
        let response = response
            .error_for_status()
            .map_err(|e| LoadError::unavailable(url, e))?;
        response.text().await.map_err(|e| LoadError::unavailable(url, e))
    }
}

impl TextFetch for SourceFetcher {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        match self.resolve(location) {
            Resolved::Url(url) => self.fetch_url(&url).await,
            Resolved::File(path) => read_file(&path).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Url(String),
    File(PathBuf),
}

fn is_http(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn join_url(base: &str, location: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), location.trim_start_matches('/'))
}

fn resolve_path(root: &Path, location: &str) -> PathBuf {
    root.join(location.trim_start_matches('/'))
}

async fn read_file(path: &Path) -> Result<String, LoadError> {
    log::debug!("Reading {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::unavailable(path.display().to_string(), e))
}
