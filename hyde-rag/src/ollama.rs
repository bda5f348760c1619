//! Ollama language model and embedding clients.
//!
//! This module is only available when the `ollama` feature is enabled.
//! Both clients call a local Ollama server's REST API directly through
//! `reqwest`, without streaming.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::document::EmbeddingVector;
use crate::error::{HydeError, Result};
use crate::llm::LanguageModel;
use crate::vectorizer::Vectorizer;

/// The default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// The default model for every role.
pub const DEFAULT_MODEL: &str = "llama3.2";

const PROVIDER: &str = "ollama";

/// Connection and model settings for an Ollama server.
///
/// Model aliases are per role so a deployment can, for example, complete with
/// one model and embed with another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the server.
    pub url: String,
    /// Model used for chat-style calls.
    pub chat_model: String,
    /// Model used for text completion.
    pub completion_model: String,
    /// Model used for embeddings.
    pub embedding_model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// HTTP request timeout.
    pub request_timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OLLAMA_URL.to_string(),
            chat_model: DEFAULT_MODEL.to_string(),
            completion_model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl OllamaConfig {
    /// Defaults overridden by `OLLAMA_URL` and `OLLAMA_MODEL` (which sets all
    /// three model roles) when present.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.url = url;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            config = config.with_model(model);
        }
        config
    }

    /// Use `model` for every role.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.chat_model = model.clone();
        self.completion_model = model.clone();
        self.embedding_model = model;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.url.trim_end_matches('/'))
    }

    fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder().timeout(self.request_timeout).build().map_err(|e| {
            HydeError::Config(format!("failed to build HTTP client: {e}"))
        })
    }
}

// ── Ollama API request/response types ──────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<R> {
    let response = client.post(url).json(body).send().await.map_err(|e| {
        error!(provider = PROVIDER, error = %e, "request failed");
        HydeError::unavailable(PROVIDER, format!("request failed: {e}"))
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail =
            serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);

        error!(provider = PROVIDER, %status, "API error");
        return Err(HydeError::unavailable(PROVIDER, format!("API returned {status}: {detail}")));
    }

    response.json().await.map_err(|e| {
        error!(provider = PROVIDER, error = %e, "failed to parse response");
        HydeError::unavailable(PROVIDER, format!("failed to parse response: {e}"))
    })
}

// ── LanguageModel implementation ───────────────────────────────────

/// A [`LanguageModel`] backed by Ollama's `/api/generate` endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use hyde_rag::ollama::{OllamaClient, OllamaConfig};
///
/// let llm = OllamaClient::new(OllamaConfig::default())?;
/// let text = llm.complete("Why is the sky blue?").await?;
/// ```
pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Create a client for the server and completion model in `config`.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        Ok(Self { client: config.http_client()?, config })
    }

    /// The client configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    fn name(&self) -> &str {
        &self.config.completion_model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            provider = PROVIDER,
            model = %self.config.completion_model,
            prompt_len = prompt.len(),
            "completing prompt"
        );

        let request = GenerateRequest {
            model: &self.config.completion_model,
            prompt,
            stream: false,
            options: GenerateOptions { temperature: self.config.temperature },
        };
        let response: GenerateResponse =
            post_json(&self.client, &self.config.endpoint("api/generate"), &request).await?;
        Ok(response.response)
    }
}

// ── Vectorizer implementation ──────────────────────────────────────

/// A dense [`Vectorizer`] backed by Ollama's `/api/embeddings` endpoint.
///
/// The embedding width depends on the model, so it is declared up front and
/// every response is checked against it.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    config: OllamaConfig,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create an embedder for the embedding model in `config`, producing
    /// vectors of width `dimensions`.
    pub fn new(config: OllamaConfig, dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(HydeError::Config("embedding dimensions must be greater than zero".into()));
        }
        Ok(Self { client: config.http_client()?, config, dimensions })
    }
}

#[async_trait]
impl Vectorizer for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        debug!(
            provider = PROVIDER,
            model = %self.config.embedding_model,
            text_len = text.len(),
            "embedding text"
        );

        let request = EmbeddingRequest { model: &self.config.embedding_model, prompt: text };
        let response: EmbeddingResponse =
            post_json(&self.client, &self.config.endpoint("api/embeddings"), &request).await?;

        if response.embedding.len() != self.dimensions {
            return Err(HydeError::unavailable(
                PROVIDER,
                format!(
                    "model {} returned {} dimensions, expected {}",
                    self.config.embedding_model,
                    response.embedding.len(),
                    self.dimensions
                ),
            ));
        }
        Ok(response.embedding)
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.dimensions)
    }
}
