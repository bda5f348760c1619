//! # hyde-cli
//!
//! The `hyde` command: seed a document store, draft a hypothetical answer with
//! Ollama, retrieve the closest documents and print a grounded answer.
//!
//! ```text
//! hyde "Does meditation lower cortisol?" --top-k 5
//! hyde --store pgvector --database-url postgres://localhost/hyde --erase
//! ```

pub mod app;
pub mod args;
pub mod report;

pub use args::Args;
