//! Error types for faultline-llm

use thiserror::Error;

/// LLM error type
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Provider not configured
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// API error
    #[error("api error: {0}")]
    Api(String),

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
