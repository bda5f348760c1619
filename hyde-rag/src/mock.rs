//! Scripted language model for tests and offline demos.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{HydeError, Result};
use crate::llm::LanguageModel;

type Responder = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A [`LanguageModel`] that replays scripted completions.
///
/// Queued responses are returned first, in order; once the queue is empty the
/// fallback responder (if any) answers, otherwise the call fails with
/// [`HydeError::CollaboratorUnavailable`]. Every prompt received is recorded.
///
/// # Example
///
/// ```rust,ignore
/// use hyde_rag::MockLanguageModel;
///
/// let llm = MockLanguageModel::new()
///     .with_response("Meditation lowers cortisol.")
///     .with_response("According to document 1, ...");
/// ```
pub struct MockLanguageModel {
    name: String,
    responses: Mutex<VecDeque<Result<String>>>,
    fallback: Option<Responder>,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLanguageModel {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Mutex::new(VecDeque::new()),
            fallback: None,
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful completion.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.push(Ok(response.into()));
        self
    }

    /// Queue a failed completion.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Err(HydeError::unavailable("mock", message)));
        self
    }

    /// Answer with `responder` once the queue is exhausted.
    pub fn with_fallback(
        mut self,
        responder: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.fallback = Some(Box::new(responder));
        self
    }

    /// Sleep for `delay` before every completion.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }

    fn push(&self, response: Result<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self.responses.lock().ok().and_then(|mut r| r.pop_front());
        match (queued, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(fallback)) => Ok(fallback(prompt)),
            (None, None) => Err(HydeError::unavailable("mock", "no scripted response left")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queue_then_fallback() {
        let llm = MockLanguageModel::new()
            .with_response("first")
            .with_failure("down")
            .with_fallback(|prompt| format!("echo: {prompt}"));

        assert_eq!(llm.complete("a").await.unwrap(), "first");
        assert!(llm.complete("b").await.is_err());
        assert_eq!(llm.complete("c").await.unwrap(), "echo: c");
        assert_eq!(llm.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn fails_when_script_runs_out() {
        let llm = MockLanguageModel::new();
        let err = llm.complete("hello").await.unwrap_err();
        assert!(matches!(err, HydeError::CollaboratorUnavailable { .. }));
        assert_eq!(llm.call_count(), 1);
    }
}
