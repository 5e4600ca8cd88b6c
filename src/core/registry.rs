//! Process-wide registry of searchable documents.
//!
//! Maps document names to their immutable indexes. The registry
//! is the only mutable shared state in the service: writes swap
//! whole `Arc<DocumentIndex>` values under a short write lock, so
//! readers always observe either the old or the fully built new
//! index for a name, never a partial one.
//!
//! Nothing here is persisted; a restart starts from an empty
//! registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::error::{AskdocError, Result};
use crate::core::index::DocumentIndex;
use crate::core::types::DocumentInfo;

/// Name → index mapping shared by the pipeline and the composer
#[derive(Default)]
pub struct DocumentRegistry {
    inner: RwLock<HashMap<String, Arc<DocumentIndex>>>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an index under its document name, replacing any
    /// existing entry wholesale.
    pub fn insert(&self, index: DocumentIndex) {
        let name = index.name().to_string();
        let replaced = self
            .inner
            .write()
            .insert(name.clone(), Arc::new(index))
            .is_some();

        if replaced {
            tracing::info!(document = %name, "Replaced existing document index");
        }
    }

    /// Remove a document from the registry.
    pub fn remove(&self, name: &str) -> Result<()> {
        match self.inner.write().remove(name) {
            Some(_) => Ok(()),
            None => Err(AskdocError::DocumentNotFound(name.to_string())),
        }
    }

    /// Look up a document's index. Missing names are a normal
    /// condition for the composer, so this is an `Option`, not an
    /// error.
    pub fn get(&self, name: &str) -> Option<Arc<DocumentIndex>> {
        self.inner.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains_key(name)
    }

    /// Metadata for all currently searchable documents, sorted by
    /// name.
    pub fn list(&self) -> Vec<DocumentInfo> {
        let mut documents: Vec<DocumentInfo> = self
            .inner
            .read()
            .values()
            .map(|index| DocumentInfo {
                name: index.name().to_string(),
                chunks: index.len(),
                indexed_at: index.indexed_at().to_rfc3339(),
            })
            .collect();

        documents.sort_by(|a, b| a.name.cmp(&b.name));
        documents
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
