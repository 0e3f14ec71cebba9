//! One-shot catalog loader: local file or http(s) URL.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::entry::{parse_catalog_str, Entry};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the entry list is fetched from.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

impl CatalogSource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            CatalogSource::Url(source.to_string())
        } else {
            CatalogSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Url(url) => f.write_str(url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch and parse the entry list. Called once per session; no retries.
pub async fn load_entries(source: &CatalogSource) -> Result<Vec<Entry>, LoadError> {
    info!("Loading catalog from {}", source);

    let result = match source {
        CatalogSource::Url(url) => fetch_catalog_url(&reqwest::Client::new(), url).await,
        CatalogSource::File(path) => read_catalog_file(path).await,
    };

    match &result {
        Ok(entries) => info!("Loaded {} entries from {}", entries.len(), source),
        Err(e) => warn!("Failed to load catalog from {}: {}", source, e),
    }
    result
}

async fn fetch_catalog_url(client: &reqwest::Client, url: &str) -> Result<Vec<Entry>, LoadError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let text = response.text().await?;
    parse_catalog_str(&text)
}

async fn read_catalog_file(path: &Path) -> Result<Vec<Entry>, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_catalog_str(&text)
}
