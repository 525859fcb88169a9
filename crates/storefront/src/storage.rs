//! Durable key-value storage for cart and locally added products.
//!
//! The browser original kept this state in `localStorage`; here each
//! namespace is a JSON file under a data directory. Reads that fail because
//! the file is missing return `Ok(None)` so callers can fall back to empty
//! state; corrupt payloads are the caller's decision (every current caller
//! swallows them with a warning, per the "never crash on bad storage"
//! contract).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Storage namespaces used by the storefront.
///
/// Cart state and product data are deliberately kept under distinct keys so
/// clearing one never touches the other.
pub mod namespaces {
    /// Persisted cart line items.
    pub const CART: &str = "cart";
    /// User-added products merged into the catalog at load time.
    pub const LOCAL_PRODUCTS: &str = "local-products";
}

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Payload could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A namespaced string store.
///
/// Payloads are opaque strings (in practice JSON); serialization stays with
/// the owning component so the store itself has no schema knowledge.
pub trait Storage: Send + Sync {
    /// Read the payload for a namespace. Missing data is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than "not found".
    fn read(&self, namespace: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload for a namespace in full. No partial writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    fn write(&self, namespace: &str, payload: &str) -> Result<(), StorageError>;
}

/// File-backed store: one `<namespace>.json` file per namespace.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (creating if necessary) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }
}

impl Storage for JsonStore {
    fn read(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(namespace)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, namespace: &str, payload: &str) -> Result<(), StorageError> {
        // Write through a temp file and rename so a crash mid-write never
        // leaves a truncated namespace behind.
        let path = self.path_for(namespace);
        let tmp = self.dir.join(format!("{namespace}.json.tmp"));
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store for tests and for degraded operation when no data
/// directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn read(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| {
            StorageError::Io(io::Error::other("storage lock poisoned"))
        })?;
        Ok(entries.get(namespace).cloned())
    }

    fn write(&self, namespace: &str, payload: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| {
            StorageError::Io(io::Error::other("storage lock poisoned"))
        })?;
        entries.insert(namespace.to_string(), payload.to_string());
        Ok(())
    }
}
