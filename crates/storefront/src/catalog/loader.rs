//! Catalog loading: primary source, bundled fallback, local additions.
//!
//! Load order:
//! 1. the configured primary source (HTTP(S) URL or filesystem path) must
//!    yield a non-empty JSON array of products;
//! 2. on any primary failure, the bundled dataset takes over and the failure
//!    is recorded as a non-fatal [`LoadStatus::Fallback`];
//! 3. only when both are empty does the load fail with [`LoadError::NoData`];
//! 4. locally persisted user additions are appended after the base list.
//!    Duplicate ids across sources are tolerated; id lookups take the first
//!    match.

use std::path::PathBuf;
use std::time::Duration;

use apteka_core::Product;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::storage::{Storage, namespaces};

use super::CatalogStore;

/// Bundled dataset used when the primary source is unavailable.
pub(crate) const FALLBACK_JSON: &str = include_str!("fallback_products.json");

/// Timeout for the primary source fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fatal catalog load failure: nothing usable from any source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither the primary source nor the bundled fallback produced data.
    #[error("no product data available from any source")]
    NoData,
}

/// How the catalog was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Primary source loaded successfully.
    Primary,
    /// Primary source failed; the bundled dataset is in use.
    Fallback {
        /// The primary failure that triggered the fallback.
        reason: String,
    },
}

/// Where the primary catalog comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Remote JSON document fetched over HTTP(S).
    Url(String),
    /// Local JSON file (the original served a relative `products.json`).
    Path(PathBuf),
}

impl CatalogSource {
    /// Interpret a config string: `http(s)://` prefixes are URLs, anything
    /// else is a filesystem path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Primary-source failure; never surfaces to callers, only feeds
/// [`LoadStatus::Fallback`].
#[derive(Debug, Error)]
enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("source returned an empty product list")]
    Empty,
}

/// Loads the catalog from the configured source with fallback.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    source: CatalogSource,
    client: reqwest::Client,
}

impl CatalogLoader {
    /// Create a loader for the given source.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoData`] if the HTTP client cannot be built,
    /// since no remote source could ever be reached.
    pub fn new(source: CatalogSource) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| {
                warn!(error = %e, "failed to build HTTP client");
                LoadError::NoData
            })?;
        Ok(Self { source, client })
    }

    /// Load the catalog: primary source, then fallback, then local merge.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoData`] only when every source is empty or
    /// unavailable. A primary failure with a usable fallback is not an
    /// error; it is recorded in the returned store's [`LoadStatus`].
    #[instrument(skip(self, storage), fields(source = %self.source))]
    pub async fn load(&self, storage: &dyn Storage) -> Result<CatalogStore, LoadError> {
        let (mut products, status) = match self.fetch_primary().await {
            Ok(products) => {
                info!(count = products.len(), "loaded catalog from primary source");
                (products, LoadStatus::Primary)
            }
            Err(e) => {
                warn!(error = %e, "primary catalog source failed, using fallback data");
                let fallback = parse_fallback();
                if fallback.is_empty() {
                    return Err(LoadError::NoData);
                }
                info!(count = fallback.len(), "loaded catalog from bundled fallback");
                (fallback, LoadStatus::Fallback { reason: e.to_string() })
            }
        };

        let local = read_local_products(storage);
        if !local.is_empty() {
            info!(count = local.len(), "merged locally added products");
            products.extend(local);
        }

        Ok(CatalogStore::new(products, status))
    }

    async fn fetch_primary(&self) -> Result<Vec<Product>, FetchError> {
        let raw = match &self.source {
            CatalogSource::Url(url) => {
                let response = self.client.get(url).send().await?;
                response.error_for_status()?.text().await?
            }
            CatalogSource::Path(path) => tokio::fs::read_to_string(path).await?,
        };
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        if products.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(products)
    }
}

fn parse_fallback() -> Vec<Product> {
    serde_json::from_str(FALLBACK_JSON).unwrap_or_else(|e| {
        // The bundled dataset ships with the binary; failing to parse it is
        // a build defect, reported as NoData by the caller.
        warn!(error = %e, "bundled fallback dataset failed to parse");
        Vec::new()
    })
}

/// Read persisted user-added products; corrupt or missing data is an empty
/// list, never an error.
pub(crate) fn read_local_products(storage: &dyn Storage) -> Vec<Product> {
    match storage.read(namespaces::LOCAL_PRODUCTS) {
        Ok(Some(payload)) => serde_json::from_str(&payload).unwrap_or_else(|e| {
            warn!(error = %e, "corrupt local-products data ignored");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "failed to read local-products data");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            CatalogSource::parse("https://example.com/products.json"),
            CatalogSource::Url(_)
        ));
        assert!(matches!(
            CatalogSource::parse("products.json"),
            CatalogSource::Path(_)
        ));
    }

    #[test]
    fn test_bundled_fallback_parses() {
        let products = parse_fallback();
        assert_eq!(products.len(), 14);
        assert_eq!(products[0].name, "Aspirin Plus");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        tokio::fs::write(&path, FALLBACK_JSON).await.unwrap();

        let loader = CatalogLoader::new(CatalogSource::Path(path)).unwrap();
        let store = loader.load(&MemoryStore::new()).await.unwrap();
        assert_eq!(store.status(), &LoadStatus::Primary);
        assert_eq!(store.all().len(), 14);
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let loader =
            CatalogLoader::new(CatalogSource::Path(PathBuf::from("/nonexistent/products.json")))
                .unwrap();
        let store = loader.load(&MemoryStore::new()).await.unwrap();
        assert!(store.used_fallback());
        assert_eq!(store.all().len(), 14);
    }

    #[tokio::test]
    async fn test_empty_primary_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        tokio::fs::write(&path, "[]").await.unwrap();

        let loader = CatalogLoader::new(CatalogSource::Path(path)).unwrap();
        let store = loader.load(&MemoryStore::new()).await.unwrap();
        assert!(store.used_fallback());
        match store.status() {
            LoadStatus::Fallback { reason } => assert!(reason.contains("empty")),
            LoadStatus::Primary => panic!("expected fallback status"),
        }
    }

    #[tokio::test]
    async fn test_local_products_merged_after_base() {
        let storage = MemoryStore::new();
        let local = r#"[{
            "id": 1,
            "name": "Aspirin Plus (local)",
            "description": "duplicate id on purpose",
            "category": "Pain Relief",
            "price": 100.0,
            "stock": 2,
            "active_ingredient": "Acetylsalicylic Acid"
        }]"#;
        crate::storage::Storage::write(&storage, namespaces::LOCAL_PRODUCTS, local).unwrap();

        let loader =
            CatalogLoader::new(CatalogSource::Path(PathBuf::from("/nonexistent.json"))).unwrap();
        let store = loader.load(&storage).await.unwrap();

        assert_eq!(store.all().len(), 15);
        // First match wins: the base product, not the local duplicate.
        let found = store.find(apteka_core::ProductId::new(1)).unwrap();
        assert_eq!(found.name, "Aspirin Plus");
    }

    #[tokio::test]
    async fn test_corrupt_local_products_ignored() {
        let storage = MemoryStore::new();
        crate::storage::Storage::write(&storage, namespaces::LOCAL_PRODUCTS, "{not json").unwrap();

        let loader =
            CatalogLoader::new(CatalogSource::Path(PathBuf::from("/nonexistent.json"))).unwrap();
        let store = loader.load(&storage).await.unwrap();
        assert_eq!(store.all().len(), 14);
    }
}
