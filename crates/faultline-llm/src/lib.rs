//! Faultline LLM - Chat-completion provider abstraction
//!
//! This crate provides the generative-text side of faultline:
//! - Provider: `LlmProvider` trait every backend implements
//! - OpenAI: chat completions via async-openai (JSON-object output mode)
//! - Mock: queued responses and injected failures for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, ResponseFormat, TokenUsage};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::LlmProvider;
