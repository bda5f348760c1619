//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hyde_rag::ollama::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};

/// Query asked when none is given.
pub const DEFAULT_QUERY: &str = "What effect does meditation have on the brain and stress levels?";

/// Where documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// In-process store, seeded on every run.
    Memory,
    /// PostgreSQL with the pgvector extension.
    Pgvector,
}

/// How text becomes vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VectorizerKind {
    /// Per-text term frequencies, variable width.
    TermFrequency,
    /// Term frequencies hashed into `--dimensions` buckets.
    Hashed,
    /// Ollama embeddings of width `--dimensions`.
    Ollama,
}

/// Answer a question with Hypothetical Document Embeddings.
#[derive(Debug, Parser)]
#[command(name = "hyde", version, about)]
pub struct Args {
    /// The question to answer
    #[arg(default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Erase stored documents before seeding
    #[arg(long)]
    pub erase: bool,

    /// Number of documents to retrieve
    #[arg(long, default_value_t = hyde_rag::HydeConfig::DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Seed manifest, loaded when the store is empty
    #[arg(long, env = "HYDE_DOCUMENTS", default_value = "documents.json")]
    pub documents: PathBuf,

    /// Document store
    #[arg(long, value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Vectorizer; defaults to term-frequency in memory and hashed for pgvector
    #[arg(long, value_enum)]
    pub vectorizer: Option<VectorizerKind>,

    /// Vector width for the hashed and ollama vectorizers
    #[arg(long, default_value_t = 512)]
    pub dimensions: usize,

    /// PostgreSQL connection string for the pgvector store
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Ollama base URL
    #[arg(long, env = "OLLAMA_URL", default_value = DEFAULT_OLLAMA_URL)]
    pub ollama_url: String,

    /// Ollama model
    #[arg(long, env = "OLLAMA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.1)]
    pub temperature: f32,

    /// Print the result as JSON instead of the sectioned report
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// The vectorizer to use, after applying the per-store default.
    pub fn vectorizer(&self) -> VectorizerKind {
        self.vectorizer.unwrap_or(match self.store {
            StoreKind::Memory => VectorizerKind::TermFrequency,
            StoreKind::Pgvector => VectorizerKind::Hashed,
        })
    }
}
