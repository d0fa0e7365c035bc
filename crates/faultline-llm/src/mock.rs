//! Mock LLM Provider for testing
//!
//! Returns queued replies (or injected failures) in order and records every
//! request it receives.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A mock LLM provider that returns queued replies or a default one.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Result<String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply with the given content.
    pub fn add_response(&self, content: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(content.into()));
    }

    /// Queue a failure for the next call.
    pub fn add_failure(&self, error: Error) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = if request.model.is_empty() {
            self.default_model().to_string()
        } else {
            request.model.clone()
        };
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        let content = match next {
            Some(reply) => reply?,
            None => "mock response".to_string(),
        };

        Ok(CompletionResponse {
            content,
            usage: None,
            finish_reason: Some("stop".to_string()),
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[tokio::test]
    async fn test_replies_in_order_then_default() {
        let mock = MockProvider::new();
        mock.add_response("first");
        mock.add_failure(Error::Api("boom".to_string()));

        let request = CompletionRequest::new("m").with_message(Message::user("hi"));
        let first = mock.complete(request.clone()).await.unwrap();
        assert_eq!(first.content, "first");
        assert_eq!(first.model, "m");

        let second = mock.complete(request.clone()).await;
        assert!(matches!(second, Err(Error::Api(msg)) if msg == "boom"));

        let third = mock.complete(CompletionRequest::default()).await.unwrap();
        assert_eq!(third.content, "mock response");
        assert_eq!(third.model, "mock-model");

        assert_eq!(mock.requests().len(), 3);
    }
}
