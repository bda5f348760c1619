//! Similarity search over a document corpus.
//!
//! [`SearchBackend`] is what the retriever queries with a probe text.
//! [`LocalSearch`] implements it by vectorizing every stored document and
//! ranking locally; a persistent store such as
//! [`PgVectorStore`](crate::pgvector::PgVectorStore) implements it with a
//! remote query instead.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::document::RankedResult;
use crate::error::{HydeError, Result};
use crate::similarity::{Candidate, rank};
use crate::store::DocumentStore;
use crate::vectorizer::Vectorizer;

/// A backend that returns the documents most similar to a probe text.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Return at most `top_k` documents, most similar to `probe` first.
    async fn similarity_search(&self, probe: &str, top_k: usize) -> Result<Vec<RankedResult>>;
}

/// Local search: a [`Vectorizer`] plus a [`DocumentStore`] plus [`rank`].
///
/// Documents are vectorized on every search, so the store needs no embedding
/// column and vectorizers with per-text width work unchanged.
pub struct LocalSearch {
    vectorizer: Arc<dyn Vectorizer>,
    store: Arc<dyn DocumentStore>,
}

impl LocalSearch {
    /// Create a local search over `store`.
    pub fn new(vectorizer: Arc<dyn Vectorizer>, store: Arc<dyn DocumentStore>) -> Self {
        Self { vectorizer, store }
    }

    /// The underlying document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

#[async_trait]
impl SearchBackend for LocalSearch {
    async fn similarity_search(&self, probe: &str, top_k: usize) -> Result<Vec<RankedResult>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let probe_vector = self.vectorizer.embed(probe).await?;
        let documents = self.store.all().await?;

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let vectors = self.vectorizer.embed_batch(&texts).await?;
        if vectors.len() != documents.len() {
            return Err(HydeError::unavailable(
                "vectorizer",
                format!("embedded {} of {} documents", vectors.len(), documents.len()),
            ));
        }

        let candidates: Vec<Candidate<_>> = documents
            .iter()
            .zip(vectors)
            .map(|(document, vector)| Candidate { id: document.id.clone(), vector, payload: document })
            .collect();

        let candidate_count = candidates.len();
        let results: Vec<RankedResult> = rank(&probe_vector, candidates, top_k)
            .into_iter()
            .map(|(document, similarity)| RankedResult { document: document.clone(), similarity })
            .collect();

        debug!(
            probe_dimensions = probe_vector.len(),
            candidate_count,
            result_count = results.len(),
            "local similarity search"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::document::{Document, EmbeddingVector};
    use crate::inmemory::InMemoryDocumentStore;
    use crate::vectorizer::{HashedTermFrequencyVectorizer, TermFrequencyVectorizer};

    async fn search_over(vectorizer: Arc<dyn Vectorizer>, contents: &[&str]) -> LocalSearch {
        let store = Arc::new(InMemoryDocumentStore::new());
        for (i, content) in contents.iter().enumerate() {
            store.add(Document::new((i + 1).to_string(), *content, "test")).await.unwrap();
        }
        LocalSearch::new(vectorizer, store)
    }

    #[tokio::test]
    async fn hashed_search_finds_shared_tokens_first() {
        let vectorizer = Arc::new(HashedTermFrequencyVectorizer::new(256));
        let search = search_over(vectorizer, &["pancake syrup recipe", "rust borrow checker"]).await;
        let results = search.similarity_search("the borrow checker in rust", 2).await.unwrap();
        assert_eq!(results[0].document.id, "2");
        assert!(results[0].similarity > 0.7);
        assert_eq!(results[1].similarity, 0.0);
    }

    #[tokio::test]
    async fn per_text_vocabularies_compare_frequency_profiles() {
        // Both documents have three distinct tokens, so their term-frequency
        // vectors are identical and they tie; the tie keeps insertion order.
        let search = search_over(
            Arc::new(TermFrequencyVectorizer),
            &["pancake syrup recipe", "rust borrow checker"],
        )
        .await;
        let results = search.similarity_search("the borrow checker in rust", 2).await.unwrap();
        assert_eq!(results[0].document.id, "1");
        assert_eq!(results[0].similarity, results[1].similarity);
    }

    /// Counts calls and can drop the last vector of every batch.
    #[derive(Default)]
    struct CountingVectorizer {
        calls: AtomicUsize,
        short_batches: bool,
    }

    #[async_trait]
    impl Vectorizer for CountingVectorizer {
        async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TermFrequencyVectorizer.vectorize(text))
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>> {
            let mut vectors = Vec::new();
            for text in texts {
                vectors.push(self.embed(text).await?);
            }
            if self.short_batches {
                vectors.pop();
            }
            Ok(vectors)
        }

        fn dimensions(&self) -> Option<usize> {
            None
        }
    }

    #[tokio::test]
    async fn zero_top_k_embeds_nothing() {
        let vectorizer = Arc::new(CountingVectorizer::default());
        let search = search_over(vectorizer.clone(), &["one", "two", "three"]).await;

        assert!(search.similarity_search("anything", 0).await.unwrap().is_empty());
        assert_eq!(vectorizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn short_batch_is_an_error() {
        let vectorizer = Arc::new(CountingVectorizer { short_batches: true, ..Default::default() });
        let search = search_over(vectorizer, &["one", "two"]).await;

        let err = search.similarity_search("one", 2).await.unwrap_err();
        assert!(matches!(
            err,
            HydeError::CollaboratorUnavailable { ref collaborator, ref message }
                if collaborator == "vectorizer" && message == "embedded 1 of 2 documents"
        ));
    }

    #[tokio::test]
    async fn empty_corpus_returns_nothing() {
        let search = search_over(Arc::new(TermFrequencyVectorizer), &[]).await;
        assert!(search.similarity_search("anything", 3).await.unwrap().is_empty());
    }
}
