//! Flat-file JSON document store.
//!
//! The whole document lives in memory behind one lock and is written back to
//! disk after every mutation, so the file always reflects the last completed
//! write.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::collection::{Collection, Record};

/// Collections every store is initialized with.
pub const COLLECTIONS: [&str; 3] = ["managers", "players", "users"];

pub type Document = BTreeMap<String, Vec<Record>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid store document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record: {0}")]
    Corrupt(String),

    #[error("a record with the same {field} already exists in {collection}")]
    Duplicate { collection: String, field: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    document: RwLock<Document>,
}

impl JsonStore {
    /// Load the document at `path`, creating it (and any missing collection)
    /// when absent.
    pub fn open(path: impl Into<PathBuf>, collections: &[&str]) -> Result<Self> {
        let path = path.into();

        let mut document: Document = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Document::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Document::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let initialized = ensure_collections(&mut document, collections);
        tracing::info!("Opened document store at {}", path.display());

        let store = Self {
            path: Some(path),
            document: RwLock::new(document),
        };

        if initialized {
            store.flush(&store.document.read())?;
        }

        Ok(store)
    }

    /// A store that never touches the filesystem.
    pub fn in_memory(collections: &[&str]) -> Self {
        let mut document = Document::new();
        ensure_collections(&mut document, collections);
        Self {
            path: None,
            document: RwLock::new(document),
        }
    }

    pub fn collection(self: &Arc<Self>, name: &'static str) -> Collection {
        Collection::new(Arc::clone(self), name)
    }

    /// Run `f` against a snapshot of one collection under the read lock.
    pub(crate) fn read<R>(&self, collection: &str, f: impl FnOnce(&[Record]) -> R) -> R {
        let document = self.document.read();
        let records = document.get(collection).map(Vec::as_slice).unwrap_or(&[]);
        f(records)
    }

    /// Run `f` against a copy of one collection under the write lock. The
    /// copy replaces the collection only once the document has been flushed;
    /// on any error memory is left as it was.
    pub(crate) fn write<R>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut Vec<Record>) -> Result<R>,
    ) -> Result<R> {
        let mut document = self.document.write();
        let mut records = document.get(collection).cloned().unwrap_or_default();
        let out = f(&mut records)?;

        let previous = document.insert(collection.to_string(), records);
        if let Err(e) = self.flush(&document) {
            match previous {
                Some(records) => document.insert(collection.to_string(), records),
                None => document.remove(collection),
            };
            tracing::error!("Discarded write to {collection}: {e}");
            return Err(e);
        }

        Ok(out)
    }

    fn flush(&self, document: &Document) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;

        tracing::debug!("Flushed document store to {}", path.display());
        Ok(())
    }
}

fn ensure_collections(document: &mut Document, collections: &[&str]) -> bool {
    let mut added = false;
    for name in collections {
        if !document.contains_key(*name) {
            document.insert((*name).to_string(), Vec::new());
            added = true;
        }
    }
    added
}
