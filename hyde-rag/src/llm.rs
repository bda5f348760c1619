//! Language model collaborator trait.

use async_trait::async_trait;

use crate::error::Result;

/// A text-completion model: given a prompt, return a single completion.
///
/// The retriever calls [`complete`](LanguageModel::complete) twice per query,
/// once for the hypothetical answer and once for the grounded answer.
/// Implementations shared between concurrent queries must be safe to call
/// concurrently (HTTP clients with a connection pool are).
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// The model identifier, used in logs and error messages.
    fn name(&self) -> &str;

    /// Complete `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`HydeError::CollaboratorUnavailable`](crate::HydeError::CollaboratorUnavailable)
    /// if the model cannot be reached or rejects the request.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
