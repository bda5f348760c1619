//! Error types for the `hyde-rag` crate.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The three stages of a HyDE retrieval cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Draft a hypothetical answer with the language model.
    Hypothesize,
    /// Vectorize the hypothetical answer and rank real documents against it.
    Retrieve,
    /// Produce the final answer grounded in the retrieved documents.
    Synthesize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Hypothesize => "hypothesize",
            Stage::Retrieve => "retrieve",
            Stage::Synthesize => "synthesize",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in HyDE operations.
#[derive(Debug, Error)]
pub enum HydeError {
    /// A language model or backing store could not be reached, or answered
    /// with a transport-level error.
    #[error("{collaborator} unavailable: {message}")]
    CollaboratorUnavailable {
        /// The collaborator that failed (e.g. `ollama`, `pgvector`).
        collaborator: String,
        /// A description of the failure.
        message: String,
    },

    /// A collaborator call did not complete within the configured timeout.
    #[error("{collaborator} did not respond within {timeout:?}")]
    Timeout {
        /// The collaborator that timed out.
        collaborator: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The backing table of a persistent store does not exist.
    #[error("schema missing: {0}")]
    SchemaMissing(String),

    /// A document with the same id is already present in the store.
    #[error("duplicate document id '{id}'")]
    DuplicateDocument {
        /// The offending id.
        id: String,
    },

    /// A stage of the retrieval cycle failed; no partial result is produced.
    #[error("{stage} stage failed")]
    Stage {
        /// The stage that failed.
        stage: Stage,
        /// The underlying failure.
        #[source]
        source: Box<HydeError>,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The seed manifest or one of the files it references could not be loaded.
    #[error("seed error ({path}): {message}")]
    Seed {
        /// The manifest or document path.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

impl HydeError {
    /// Wrap this error as a failure of the given stage.
    pub fn in_stage(self, stage: Stage) -> Self {
        HydeError::Stage { stage, source: Box::new(self) }
    }

    /// The stage that failed, if this error came out of the retrieval cycle.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            HydeError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub(crate) fn unavailable(collaborator: &str, message: impl Into<String>) -> Self {
        HydeError::CollaboratorUnavailable {
            collaborator: collaborator.to_string(),
            message: message.into(),
        }
    }
}

/// A convenience result type for HyDE operations.
pub type Result<T> = std::result::Result<T, HydeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_names_stage_and_cause() {
        let err = HydeError::unavailable("ollama", "connection refused").in_stage(Stage::Hypothesize);
        assert_eq!(err.stage(), Some(Stage::Hypothesize));
        assert_eq!(err.to_string(), "hypothesize stage failed");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("ollama unavailable: connection refused"));
    }

    #[test]
    fn plain_errors_have_no_stage() {
        let err = HydeError::DuplicateDocument { id: "7".into() };
        assert_eq!(err.stage(), None);
        assert_eq!(err.to_string(), "duplicate document id '7'");
    }
}
