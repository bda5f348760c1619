//! # hyde-rag
//!
//! Hypothetical Document Embeddings (HyDE) retrieval.
//!
//! ## Overview
//!
//! Instead of embedding the user's query, a language model first drafts a
//! hypothetical answer. That draft is vectorized and used as the similarity
//! probe against the corpus, and the retrieved documents ground a final,
//! cited answer.
//!
//! - [`HydeRetriever`] - the three-stage orchestrator (hypothesize → retrieve → synthesize)
//! - [`Vectorizer`] - text → embedding; [`TermFrequencyVectorizer`] is the default scheme
//! - [`similarity`] - cosine similarity with per-pair zero padding, and top-k ranking
//! - [`DocumentStore`] / [`InMemoryDocumentStore`] - the corpus
//! - [`SearchBackend`] / [`LocalSearch`] - similarity search over a store
//! - [`LanguageModel`] / [`MockLanguageModel`] - the completion collaborator
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hyde_rag::{
//!     Document, DocumentStore, HydeRetriever, InMemoryDocumentStore, LocalSearch,
//!     MockLanguageModel, TermFrequencyVectorizer,
//! };
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! store.add(Document::new("1", "Meditation lowers cortisol.", "inline")).await?;
//!
//! let retriever = HydeRetriever::builder()
//!     .language_model(Arc::new(MockLanguageModel::new().with_fallback(|_| "...".into())))
//!     .search_backend(Arc::new(LocalSearch::new(Arc::new(TermFrequencyVectorizer), store)))
//!     .build()?;
//!
//! let result = retriever.answer("Does meditation reduce stress?", 3).await?;
//! ```
//!
//! ## Features
//!
//! - `ollama` - [`ollama::OllamaClient`] and [`ollama::OllamaEmbedder`]
//! - `pgvector` - [`pgvector::PgVectorStore`], a PostgreSQL-backed store and search backend

pub mod config;
pub mod document;
pub mod error;
pub mod inmemory;
pub mod llm;
pub mod mock;
pub mod prompts;
pub mod retriever;
pub mod search;
pub mod seed;
pub mod similarity;
pub mod store;
pub mod vectorizer;

#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "pgvector")]
pub mod pgvector;

pub use config::{HydeConfig, HydeConfigBuilder};
pub use document::{Document, EmbeddingVector, HydeQueryResult, RankedResult};
pub use error::{HydeError, Result, Stage};
pub use inmemory::InMemoryDocumentStore;
pub use llm::LanguageModel;
pub use mock::MockLanguageModel;
pub use retriever::{Hypothesis, HydeRetriever, HydeRetrieverBuilder, Retrieval};
pub use search::{LocalSearch, SearchBackend};
pub use seed::{SeedEntry, SeedManifest};
pub use store::DocumentStore;
pub use vectorizer::{HashedTermFrequencyVectorizer, TermFrequencyVectorizer, Vectorizer};
