//! In-memory document store.
//!
//! This module provides [`InMemoryDocumentStore`], a zero-dependency store
//! backed by a `Vec` protected by a `tokio::sync::RwLock`. It is suitable
//! for development, testing, and small corpora.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::Document;
use crate::error::{HydeError, Result};
use crate::store::DocumentStore;

#[derive(Debug, Default)]
struct Inner {
    documents: Vec<Document>,
    ids: HashSet<String>,
}

/// An in-memory [`DocumentStore`].
///
/// Readers share the lock, so concurrent queries rank against a consistent
/// snapshot; `add` and `erase` take it exclusively.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl InMemoryDocumentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn add(&self, document: Document) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.ids.insert(document.id.clone()) {
            return Err(HydeError::DuplicateDocument { id: document.id });
        }
        debug!(document.id = %document.id, source = %document.source, "added document");
        inner.documents.push(document);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Document>> {
        Ok(self.inner.read().await.documents.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.documents.len())
    }

    async fn erase(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.documents.clear();
        inner.ids.clear();
        Ok(())
    }
}
