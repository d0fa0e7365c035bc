//! Error types for faultline-core
//!
//! Transport problems are not errors here: the simulator reports them as
//! [`RpcOutcome::TransportFailure`](crate::protocol::RpcOutcome) values.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Scenario id not present in the catalog
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// Credential for the generative-text provider is missing
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// Invalid configuration
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Config field name
        field: String,
        /// Detailed message
        message: String,
    },

    /// Model output failed both parse stages
    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    /// LLM provider error
    #[error("llm error: {0}")]
    Llm(#[from] faultline_llm::Error),
}

impl Error {
    /// Whether this error belongs to the configuration class (fatal to the operation)
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::UnknownScenario(_) | Self::MissingCredential(_) | Self::InvalidConfig { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
