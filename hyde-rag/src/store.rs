//! Document store trait.

use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;

/// An addressable collection of [`Document`]s.
///
/// Stores preserve insertion order, which ranking relies on to break ties
/// deterministically, and reject a second document with an id already present.
///
/// # Example
///
/// ```rust,ignore
/// use hyde_rag::{Document, DocumentStore, InMemoryDocumentStore};
///
/// let store = InMemoryDocumentStore::new();
/// store.add(Document::new("1", "Meditation reduces cortisol.", "notes.txt")).await?;
/// assert_eq!(store.count().await?, 1);
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Add a document.
    ///
    /// # Errors
    ///
    /// Returns [`HydeError::DuplicateDocument`](crate::HydeError::DuplicateDocument)
    /// if a document with the same id is already stored.
    async fn add(&self, document: Document) -> Result<()>;

    /// All documents, in insertion order.
    async fn all(&self) -> Result<Vec<Document>>;

    /// Number of stored documents.
    async fn count(&self) -> Result<usize>;

    /// Remove every document. Erasing an empty store is a no-op.
    async fn erase(&self) -> Result<()>;

    /// Add documents in order, stopping at the first failure.
    async fn extend(&self, documents: Vec<Document>) -> Result<()> {
        for document in documents {
            self.add(document).await?;
        }
        Ok(())
    }
}
