//! Configuration for the HyDE retriever.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HydeError, Result};

/// Configuration parameters for [`HydeRetriever`](crate::HydeRetriever).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydeConfig {
    /// Number of documents retrieved when the caller does not say otherwise.
    pub top_k: usize,
    /// Upper bound on each language-model call. `None` waits indefinitely.
    pub llm_timeout: Option<Duration>,
}

impl HydeConfig {
    /// Default number of documents to retrieve.
    pub const DEFAULT_TOP_K: usize = 3;

    /// Default per-call language-model timeout.
    pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a new builder for constructing a [`HydeConfig`].
    pub fn builder() -> HydeConfigBuilder {
        HydeConfigBuilder::default()
    }
}

impl Default for HydeConfig {
    fn default() -> Self {
        Self { top_k: Self::DEFAULT_TOP_K, llm_timeout: Some(Self::DEFAULT_LLM_TIMEOUT) }
    }
}

/// Builder for constructing a validated [`HydeConfig`].
#[derive(Debug, Clone, Default)]
pub struct HydeConfigBuilder {
    config: HydeConfig,
}

impl HydeConfigBuilder {
    /// Set the default number of documents to retrieve. Zero is allowed and
    /// retrieves nothing.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the per-call language-model timeout.
    pub fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.config.llm_timeout = Some(timeout);
        self
    }

    /// Wait for language-model calls indefinitely.
    pub fn no_llm_timeout(mut self) -> Self {
        self.config.llm_timeout = None;
        self
    }

    /// Build the [`HydeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`HydeError::Config`] if `llm_timeout` is zero.
    pub fn build(self) -> Result<HydeConfig> {
        if self.config.llm_timeout == Some(Duration::ZERO) {
            return Err(HydeError::Config("llm_timeout must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_retrieve_three() {
        let config = HydeConfig::default();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.llm_timeout, Some(Duration::from_secs(120)));
        assert_eq!(HydeConfig::builder().build().unwrap(), config);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = HydeConfig::builder().llm_timeout(Duration::ZERO).build().unwrap_err();
        assert!(matches!(err, HydeError::Config(_)));
    }

    #[test]
    fn zero_top_k_is_accepted() {
        let config = HydeConfig::builder().top_k(0).no_llm_timeout().build().unwrap();
        assert_eq!(config.top_k, 0);
        assert_eq!(config.llm_timeout, None);
    }
}
