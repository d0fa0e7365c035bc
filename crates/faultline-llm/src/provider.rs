//! LLM Provider trait definition
//!
//! This module defines the trait every chat-completion backend implements.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Result;

/// Trait for LLM providers
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Complete a conversation (text only)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
