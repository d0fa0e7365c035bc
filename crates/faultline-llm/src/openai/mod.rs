//! OpenAI - async-openai provider
//!
//! Chat completions against the OpenAI API (or any compatible base URL)
//! using async-openai 0.32+.

use crate::completion::{CompletionRequest, CompletionResponse, ResponseFormat, TokenUsage};
use crate::error::{Error, Result};
use crate::message::{Message, MessageRole};
use crate::provider::LlmProvider;
use crate::util::{mask_api_key, truncate_safe, validate_api_key};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
        ResponseFormat as OpenAiResponseFormat,
    },
    Client,
};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check your API key configuration.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if error.len() > 300 {
        format!("{}...(truncated)", truncate_safe(error, 300))
    } else {
        error.to_string()
    }
}

/// Default model for diagnosis requests
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Configuration for the OpenAI provider
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key for authentication
    pub api_key: String,
    /// Optional custom base URL (for Azure OpenAI, proxies or test servers)
    pub base_url: Option<String>,
    /// Optional organization ID
    pub org_id: Option<String>,
    /// Default model to use for completions
    pub default_model: String,
    /// Request timeout duration
    pub timeout: Duration,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            org_id: None,
            default_model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads `OPENAI_API_KEY` (required), `OPENAI_BASE_URL` and `OPENAI_ORG_ID`.
    ///
    /// # Errors
    /// Returns [`Error::NotConfigured`] if the key is missing or blank
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if let Some(reason) = validate_api_key(&api_key, "OpenAI") {
            return Err(Error::NotConfigured(format!("OPENAI_API_KEY: {}", reason)));
        }

        let mut config = Self::new(api_key);
        config.base_url = std::env::var("OPENAI_BASE_URL").ok();
        config.org_id = std::env::var("OPENAI_ORG_ID").ok();
        Ok(config)
    }

    /// Sets a custom base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the organization ID
    #[must_use]
    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Sets the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Sets the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI API provider for chat completions
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    default_model: String,
}

impl OpenAiProvider {
    /// Creates a new provider with the given configuration
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the HTTP client cannot be built
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(&config.api_key);

        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        if let Some(org_id) = &config.org_id {
            openai_config = openai_config.with_org_id(org_id);
        }

        // async-openai's default reqwest client has no timeout
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        // Single attempt: a zero elapsed-time budget disables the client's own retries
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::build(http_client, openai_config, backoff);

        debug!(config = ?config, "OpenAI provider initialized");

        Ok(Self {
            client,
            default_model: config.default_model,
        })
    }

    fn convert_message(msg: Message) -> ChatCompletionRequestMessage {
        match msg.role {
            MessageRole::System => ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(msg.content),
                name: None,
            }
            .into(),
            MessageRole::User => ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(msg.content),
                name: None,
            }
            .into(),
        }
    }

    fn convert_format(format: ResponseFormat) -> OpenAiResponseFormat {
        match format {
            ResponseFormat::Text => OpenAiResponseFormat::Text,
            ResponseFormat::JsonObject => OpenAiResponseFormat::JsonObject,
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model
        };

        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .into_iter()
            .map(Self::convert_message)
            .collect();

        let openai_request = CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: Some(Self::convert_format(request.response_format)),
            ..Default::default()
        };

        debug!("Sending request to OpenAI");

        let response = self.client.chat().create(openai_request).await.map_err(
            |e: async_openai::error::OpenAIError| Error::Api(sanitize_api_error(&e.to_string())),
        )?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::InvalidResponse("Empty message content".to_string()))?;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            content,
            usage,
            finish_reason: choice.finish_reason.as_ref().map(|r| format!("{:?}", r)),
            model: response.model,
        })
    }
}
