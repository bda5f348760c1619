//! Wiring from [`Args`] to a ready [`HydeRetriever`].

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use hyde_rag::ollama::{OllamaClient, OllamaConfig, OllamaEmbedder};
use hyde_rag::pgvector::PgVectorStore;
use hyde_rag::seed::{prepare_store, seed_if_empty};
use hyde_rag::{
    DocumentStore, HashedTermFrequencyVectorizer, HydeConfig, HydeQueryResult, HydeRetriever,
    InMemoryDocumentStore, LanguageModel, LocalSearch, SearchBackend, SeedManifest,
    TermFrequencyVectorizer, Vectorizer,
};
use tracing::info;

use crate::args::{Args, StoreKind, VectorizerKind};

/// Ollama settings: the environment, then the arguments on top.
pub fn ollama_config(args: &Args) -> OllamaConfig {
    let mut config = OllamaConfig::from_env()
        .with_model(&args.model)
        .with_temperature(args.temperature);
    config.url = args.ollama_url.clone();
    config
}

/// Answer `args.query` with Ollama as the language model.
pub async fn run(args: &Args) -> Result<HydeQueryResult> {
    let client =
        OllamaClient::new(ollama_config(args)).context("failed to create Ollama client")?;
    run_with(args, Arc::new(client)).await
}

/// Answer `args.query` with the given language model.
pub async fn run_with(
    args: &Args,
    language_model: Arc<dyn LanguageModel>,
) -> Result<HydeQueryResult> {
    info!("initializing HyDE retriever");
    let vectorizer = build_vectorizer(args)?;
    let (store, search_backend) = open_store(args, vectorizer).await?;
    prepare(args, store.as_ref()).await?;

    let config = HydeConfig::builder().top_k(args.top_k).build()?;
    let retriever = HydeRetriever::builder()
        .config(config)
        .language_model(language_model)
        .search_backend(search_backend)
        .build()?;

    let result = retriever.answer(&args.query, args.top_k).await?;
    Ok(result)
}

fn build_vectorizer(args: &Args) -> Result<Arc<dyn Vectorizer>> {
    let vectorizer: Arc<dyn Vectorizer> = match args.vectorizer() {
        VectorizerKind::TermFrequency => Arc::new(TermFrequencyVectorizer::new()),
        VectorizerKind::Hashed => Arc::new(HashedTermFrequencyVectorizer::new(args.dimensions)),
        VectorizerKind::Ollama => Arc::new(
            OllamaEmbedder::new(ollama_config(args), args.dimensions)
                .context("failed to create Ollama embedder")?,
        ),
    };
    Ok(vectorizer)
}

async fn open_store(
    args: &Args,
    vectorizer: Arc<dyn Vectorizer>,
) -> Result<(Arc<dyn DocumentStore>, Arc<dyn SearchBackend>)> {
    match args.store {
        StoreKind::Memory => {
            let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
            let search: Arc<dyn SearchBackend> =
                Arc::new(LocalSearch::new(vectorizer, store.clone()));
            Ok((store, search))
        }
        StoreKind::Pgvector => {
            let Some(url) = args.database_url.as_deref() else {
                bail!("--database-url (or DATABASE_URL) is required for the pgvector store");
            };
            let pg = Arc::new(
                PgVectorStore::connect(url, vectorizer)
                    .await
                    .context("failed to connect to PostgreSQL")?,
            );
            let store: Arc<dyn DocumentStore> = pg.clone();
            let search: Arc<dyn SearchBackend> = pg;
            Ok((store, search))
        }
    }
}

/// Erase on request, then seed from the manifest if the store is empty.
async fn prepare(args: &Args, store: &dyn DocumentStore) -> Result<()> {
    let count = prepare_store(store, args.erase).await?;
    if count > 0 {
        info!(count, "using existing documents");
        return Ok(());
    }

    let manifest = SeedManifest::load(&args.documents)
        .await
        .with_context(|| format!("failed to load seed manifest {}", args.documents.display()))?;
    let added = seed_if_empty(store, &manifest).await?;
    info!(added, manifest = %args.documents.display(), "loaded documents");
    Ok(())
}
