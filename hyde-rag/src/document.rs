//! Data types for documents, ranked results, and query results.

use serde::{Deserialize, Serialize};

/// An embedding: an ordered sequence of floats.
///
/// Dimensionality is a property of the vectorizer and may differ between
/// texts; comparisons reconcile lengths per pair (see [`crate::similarity`]).
pub type EmbeddingVector = Vec<f32>;

/// A source document. Immutable once added to a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier within one store.
    pub id: String,
    /// The text content of the document.
    pub content: String,
    /// Human-readable label of where the document came from.
    pub source: String,
}

impl Document {
    /// Create a new document.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), content: content.into(), source: source.into() }
    }
}

/// A retrieved [`Document`] paired with its similarity to the probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedResult {
    /// The retrieved document.
    pub document: Document,
    /// Cosine similarity, in `[-1, 1]`.
    pub similarity: f32,
}

/// The observable output of one retrieval cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydeQueryResult {
    /// The language model's draft answer, used as the retrieval probe.
    pub hypothetical_answer: String,
    /// The documents retrieved with the probe, most similar first.
    pub retrieved_documents: Vec<Document>,
    /// The answer grounded in `retrieved_documents`.
    pub final_answer: String,
}
