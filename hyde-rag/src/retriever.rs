//! HyDE retriever orchestrator.
//!
//! The [`HydeRetriever`] runs one retrieval cycle per query in three named
//! stages, each consuming the previous stage's output:
//!
//! 1. [`hypothesize`](HydeRetriever::hypothesize): the language model drafts
//!    the answer a good source document would contain.
//! 2. [`retrieve`](HydeRetriever::retrieve): that draft (never the raw query)
//!    is the probe for similarity search over the corpus.
//! 3. [`synthesize`](HydeRetriever::synthesize): the language model answers
//!    the query from the retrieved documents only, citing their ids.
//!
//! # Example
//!
//! ```rust,ignore
//! use hyde_rag::{HydeRetriever, HydeConfig, InMemoryDocumentStore, LocalSearch, TermFrequencyVectorizer};
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let retriever = HydeRetriever::builder()
//!     .config(HydeConfig::default())
//!     .language_model(Arc::new(my_llm))
//!     .search_backend(Arc::new(LocalSearch::new(Arc::new(TermFrequencyVectorizer), store)))
//!     .build()?;
//!
//! let result = retriever.answer("What are the benefits of meditation?", 3).await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::config::HydeConfig;
use crate::document::{HydeQueryResult, RankedResult};
use crate::error::{HydeError, Result, Stage};
use crate::llm::LanguageModel;
use crate::prompts;
use crate::search::SearchBackend;

/// Output of the hypothesize stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    /// The user's query.
    pub query: String,
    /// The model's draft answer.
    pub hypothetical_answer: String,
}

/// Output of the retrieve stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    /// The user's query.
    pub query: String,
    /// The draft answer that served as the probe.
    pub hypothetical_answer: String,
    /// Retrieved documents with their similarity, most similar first.
    pub ranked: Vec<RankedResult>,
}

/// The HyDE orchestrator.
///
/// Holds no per-query state; one instance can serve concurrent queries behind
/// an `Arc`. Construct one via [`HydeRetriever::builder()`].
pub struct HydeRetriever {
    config: HydeConfig,
    language_model: Arc<dyn LanguageModel>,
    search_backend: Arc<dyn SearchBackend>,
}

impl HydeRetriever {
    /// Create a new [`HydeRetrieverBuilder`].
    pub fn builder() -> HydeRetrieverBuilder {
        HydeRetrieverBuilder::default()
    }

    /// Return a reference to the retriever configuration.
    pub fn config(&self) -> &HydeConfig {
        &self.config
    }

    /// Run a full cycle with the configured default `top_k`.
    pub async fn answer_default(&self, query: &str) -> Result<HydeQueryResult> {
        self.answer(query, self.config.top_k).await
    }

    /// Run a full cycle: hypothesize → retrieve → synthesize.
    ///
    /// # Errors
    ///
    /// Returns [`HydeError::Stage`] naming the first stage that failed. Later
    /// stages do not run and no partial result is returned.
    pub async fn answer(&self, query: &str, top_k: usize) -> Result<HydeQueryResult> {
        info!(query, top_k, model = self.language_model.name(), "processing query");

        let hypothesis = self.hypothesize(query).await?;
        let retrieval = self.retrieve(hypothesis, top_k).await?;
        self.synthesize(retrieval).await
    }

    /// Stage 1: ask the language model for a hypothetical answer.
    pub async fn hypothesize(&self, query: &str) -> Result<Hypothesis> {
        let prompt = prompts::hypothetical_answer_prompt(query);
        let hypothetical_answer =
            self.complete(&prompt).await.map_err(|e| stage_failed(Stage::Hypothesize, e))?;

        info!(answer_len = hypothetical_answer.len(), "generated hypothetical answer");
        Ok(Hypothesis { query: query.to_string(), hypothetical_answer })
    }

    /// Stage 2: search the corpus with the hypothetical answer as probe.
    pub async fn retrieve(&self, hypothesis: Hypothesis, top_k: usize) -> Result<Retrieval> {
        let ranked = self
            .search_backend
            .similarity_search(&hypothesis.hypothetical_answer, top_k)
            .await
            .map_err(|e| stage_failed(Stage::Retrieve, e))?;

        info!(
            result_count = ranked.len(),
            top_similarity = ranked.first().map(|r| r.similarity),
            "retrieved documents"
        );
        Ok(Retrieval {
            query: hypothesis.query,
            hypothetical_answer: hypothesis.hypothetical_answer,
            ranked,
        })
    }

    /// Stage 3: answer the query from the retrieved documents.
    ///
    /// Runs even when nothing was retrieved; the prompt then carries an empty
    /// source block and asks the model to acknowledge the gap.
    pub async fn synthesize(&self, retrieval: Retrieval) -> Result<HydeQueryResult> {
        let retrieved_documents: Vec<_> =
            retrieval.ranked.into_iter().map(|r| r.document).collect();
        let prompt = prompts::grounded_answer_prompt(&retrieval.query, &retrieved_documents);
        let final_answer =
            self.complete(&prompt).await.map_err(|e| stage_failed(Stage::Synthesize, e))?;

        info!(source_count = retrieved_documents.len(), "generated grounded answer");
        Ok(HydeQueryResult {
            hypothetical_answer: retrieval.hypothetical_answer,
            retrieved_documents,
            final_answer,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let call = self.language_model.complete(prompt);
        match self.config.llm_timeout {
            Some(timeout) => tokio::time::timeout(timeout, call).await.map_err(|_| {
                HydeError::Timeout { collaborator: self.language_model.name().to_string(), timeout }
            })?,
            None => call.await,
        }
    }
}

fn stage_failed(stage: Stage, e: HydeError) -> HydeError {
    error!(%stage, error = %e, "stage failed");
    e.in_stage(stage)
}

/// Builder for constructing a [`HydeRetriever`].
///
/// The language model and search backend are required; the configuration
/// defaults to [`HydeConfig::default()`].
#[derive(Default)]
pub struct HydeRetrieverBuilder {
    config: Option<HydeConfig>,
    language_model: Option<Arc<dyn LanguageModel>>,
    search_backend: Option<Arc<dyn SearchBackend>>,
}

impl HydeRetrieverBuilder {
    /// Set the retriever configuration.
    pub fn config(mut self, config: HydeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the language model used by the hypothesize and synthesize stages.
    pub fn language_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.language_model = Some(model);
        self
    }

    /// Set the backend searched in the retrieve stage.
    pub fn search_backend(mut self, backend: Arc<dyn SearchBackend>) -> Self {
        self.search_backend = Some(backend);
        self
    }

    /// Build the [`HydeRetriever`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`HydeError::Config`] if a required field is missing.
    pub fn build(self) -> Result<HydeRetriever> {
        let language_model = self
            .language_model
            .ok_or_else(|| HydeError::Config("language_model is required".to_string()))?;
        let search_backend = self
            .search_backend
            .ok_or_else(|| HydeError::Config("search_backend is required".to_string()))?;

        Ok(HydeRetriever { config: self.config.unwrap_or_default(), language_model, search_backend })
    }
}
