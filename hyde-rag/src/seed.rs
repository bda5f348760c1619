//! Seed manifest loading.
//!
//! A manifest is a JSON array whose entries either reference a text file or
//! carry inline content:
//!
//! ```json
//! [
//!   { "file": "docs/meditation.txt" },
//!   { "content": "Pancakes date back to ancient Greece." }
//! ]
//! ```
//!
//! File paths are resolved relative to the manifest's directory. Only UTF-8
//! text is read; other document formats are not parsed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::Document;
use crate::error::{HydeError, Result};
use crate::store::DocumentStore;

/// Source label for documents that came from inline manifest content.
pub const INLINE_SOURCE: &str = "inline";

/// One manifest entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SeedEntry {
    /// A text file, relative to the manifest.
    File {
        /// Path of the file.
        file: PathBuf,
    },
    /// Inline document content.
    Content {
        /// The document text.
        content: String,
    },
}

/// A parsed seed manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedManifest {
    root: PathBuf,
    entries: Vec<SeedEntry>,
}

impl SeedManifest {
    /// Parse manifest JSON; relative file entries resolve against `root`.
    pub fn parse(json: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let entries: Vec<SeedEntry> = serde_json::from_str(json).map_err(|e| HydeError::Seed {
            path: root.display().to_string(),
            message: format!("invalid manifest: {e}"),
        })?;
        Ok(Self { root, entries })
    }

    /// Read and parse the manifest at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| HydeError::Seed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&json, root)
    }

    /// The manifest entries, in order.
    pub fn entries(&self) -> &[SeedEntry] {
        &self.entries
    }

    /// Materialize the entries as documents with ids `first_id`, `first_id + 1`, ...
    pub async fn documents(&self, first_id: usize) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(self.entries.len());
        for (offset, entry) in self.entries.iter().enumerate() {
            let id = (first_id + offset).to_string();
            let document = match entry {
                SeedEntry::Content { content } => Document::new(id, content.clone(), INLINE_SOURCE),
                SeedEntry::File { file } => {
                    let path = self.root.join(file);
                    let content =
                        tokio::fs::read_to_string(&path).await.map_err(|e| HydeError::Seed {
                            path: path.display().to_string(),
                            message: e.to_string(),
                        })?;
                    Document::new(id, content, file.display().to_string())
                }
            };
            documents.push(document);
        }
        Ok(documents)
    }
}

/// Erase `store` if asked to and it holds documents.
///
/// Returns the number of documents left in the store.
pub async fn prepare_store(store: &dyn DocumentStore, erase: bool) -> Result<usize> {
    let count = store.count().await?;
    if count > 0 && erase {
        warn!(count, "erasing existing documents");
        store.erase().await?;
        return Ok(0);
    }
    Ok(count)
}

/// Load `manifest` into `store` only when the store is empty.
///
/// Returns the number of documents added.
pub async fn seed_if_empty(store: &dyn DocumentStore, manifest: &SeedManifest) -> Result<usize> {
    let count = store.count().await?;
    if count > 0 {
        info!(count, "store already populated, skipping seed");
        return Ok(0);
    }

    let documents = manifest.documents(count + 1).await?;
    let added = documents.len();
    store.extend(documents).await?;
    info!(added, "seeded store");
    Ok(added)
}
