//! Diagnosis orchestrator
//!
//! Composes prompt building, the model call and parsing into
//! [`Diagnoser::analyze`], which never fails: any problem from the model
//! stage onward becomes a degraded result with fixed placeholder text.
//! Nothing is cached; every call performs a full round trip.

use crate::error::{Error, Result};
use crate::parser::{parse_diagnosis, ParsedDiagnosis};
use crate::prompt::{build_prompt, SIGN_OFF_BLOCK};
use crate::protocol::RpcOutcome;
use faultline_llm::{
    CompletionRequest, LlmProvider, Message, OpenAiConfig, OpenAiProvider, ResponseFormat,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Root cause reported when the model stage fails
pub const DEGRADED_ROOT_CAUSE: &str = "AI Processing Failed";

/// Prefix of the client reply reported when the model stage fails
pub const DEGRADED_REPLY_PREFIX: &str = "System Error: ";

/// Error held by the presentation layer between simulate and analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveError {
    /// JSON-RPC error code
    pub code: i64,
    /// JSON-RPC error message
    pub message: String,
}

impl ActiveError {
    /// Manually entered error, bypassing request construction
    pub fn manual(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The error carried by an outcome, if it is an RPC error
    #[must_use]
    pub fn from_outcome(outcome: &RpcOutcome) -> Option<Self> {
        match outcome {
            RpcOutcome::RpcError { code, message } => Some(Self {
                code: *code,
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

/// Everything the prompt needs about one error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisInput {
    /// Endpoint as it should appear to the model
    pub endpoint: String,
    /// JSON-RPC method that failed
    pub method: String,
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
}

impl DiagnosisInput {
    /// Build from the active error
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>, error: &ActiveError) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            code: error.code,
            message: error.message.clone(),
        }
    }
}

/// Where a diagnosis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisSource {
    /// Parsed from model output
    Ai,
    /// Placeholder after a model-stage failure
    Degraded,
}

/// Displayable diagnosis; both text fields are always non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Technical root cause (internal note)
    pub root_cause: String,
    /// Customer-facing reply (markdown)
    pub client_reply: String,
    /// Origin of the text
    pub source: DiagnosisSource,
}

impl DiagnosisResult {
    /// Wrap a parsed model answer, appending the sign-off block if the
    /// reply does not already end with it
    #[must_use]
    pub fn from_model(parsed: ParsedDiagnosis) -> Self {
        let (root_cause, mut client_reply) = parsed.into_parts();
        client_reply.truncate(client_reply.trim_end().len());
        if !client_reply.ends_with(SIGN_OFF_BLOCK) {
            client_reply.push_str(SIGN_OFF_BLOCK);
        }
        Self {
            root_cause,
            client_reply,
            source: DiagnosisSource::Ai,
        }
    }

    /// Placeholder result for a model-stage failure
    #[must_use]
    pub fn degraded(cause: &Error) -> Self {
        Self {
            root_cause: DEGRADED_ROOT_CAUSE.to_string(),
            client_reply: format!("{}{}", DEGRADED_REPLY_PREFIX, cause),
            source: DiagnosisSource::Degraded,
        }
    }

    /// Whether the model stage failed
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.source == DiagnosisSource::Degraded
    }
}

/// Model call parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnoserConfig {
    /// Model identifier
    pub model: String,
    /// Output length cap in tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for DiagnoserConfig {
    fn default() -> Self {
        Self {
            model: faultline_llm::openai::DEFAULT_MODEL.to_string(),
            max_tokens: 400,
            temperature: 0.3,
        }
    }
}

/// Diagnosis orchestrator
#[derive(Clone)]
pub struct Diagnoser {
    provider: Arc<dyn LlmProvider>,
    config: DiagnoserConfig,
}

impl Diagnoser {
    /// Create an orchestrator over any provider
    pub fn new(provider: Arc<dyn LlmProvider>, config: DiagnoserConfig) -> Self {
        Self { provider, config }
    }

    /// Create an orchestrator backed by OpenAI, reading the credential from
    /// the environment
    ///
    /// # Errors
    /// Returns [`Error::MissingCredential`] when `OPENAI_API_KEY` is absent
    pub fn openai_from_env(
        config: DiagnoserConfig,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut openai = OpenAiConfig::from_env()
            .map_err(|e| Error::MissingCredential(e.to_string()))?
            .with_model(config.model.clone())
            .with_timeout(timeout);
        if let Some(url) = base_url {
            openai = openai.with_base_url(url);
        }
        let provider = OpenAiProvider::new(openai)?;
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Model call parameters
    #[must_use]
    pub fn config(&self) -> &DiagnoserConfig {
        &self.config
    }

    /// Diagnose one error. Never fails.
    #[instrument(skip(self, input), fields(method = %input.method, code = input.code))]
    pub async fn analyze(&self, input: &DiagnosisInput) -> DiagnosisResult {
        match self.try_analyze(input).await {
            Ok(parsed) => {
                info!(
                    provider = self.provider.name(),
                    model = %self.config.model,
                    "Diagnosis produced"
                );
                DiagnosisResult::from_model(parsed)
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Diagnosis degraded");
                DiagnosisResult::degraded(&e)
            }
        }
    }

    async fn try_analyze(&self, input: &DiagnosisInput) -> Result<ParsedDiagnosis> {
        let prompt = build_prompt(input);

        let request = CompletionRequest::new(self.config.model.clone())
            .with_message(Message::system(prompt.system))
            .with_message(Message::user(prompt.user))
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
            .with_response_format(ResponseFormat::JsonObject);

        let response = self.provider.complete(request).await?;
        parse_diagnosis(&response.content)
    }
}
