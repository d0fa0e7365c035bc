//! Configuration types

use anyhow::{bail, Result};
use faultline_core::{endpoint_host, DiagnoserConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Upper bound for the interactive simulation timeout
const MAX_RPC_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub rpc: RpcConfig,
    pub llm: LlmConfig,
}

/// Node endpoint settings
#[derive(Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub endpoint: String,
    #[serde(default = "default_rpc_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("endpoint", &endpoint_host(&self.endpoint))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Generative-text settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_rpc_timeout_secs() -> u64 {
    5
}

fn default_model() -> String {
    faultline_llm::openai::DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    400
}

fn default_temperature() -> f32 {
    0.3
}

fn default_llm_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.rpc.endpoint.trim().is_empty() {
            bail!("rpc.endpoint must not be empty");
        }
        if !(1..=MAX_RPC_TIMEOUT_SECS).contains(&self.rpc.timeout_secs) {
            bail!(
                "rpc.timeout_secs must be between 1 and {} (got {})",
                MAX_RPC_TIMEOUT_SECS,
                self.rpc.timeout_secs
            );
        }
        if self.llm.model.trim().is_empty() {
            bail!("llm.model must not be empty");
        }
        if self.llm.max_tokens == 0 {
            bail!("llm.max_tokens must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            bail!(
                "llm.temperature must be between 0.0 and 2.0 (got {})",
                self.llm.temperature
            );
        }
        if self.llm.timeout_secs == 0 {
            bail!("llm.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc.timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_secs)
    }

    pub fn diagnoser_config(&self) -> DiagnoserConfig {
        DiagnoserConfig {
            model: self.llm.model.clone(),
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
        }
    }
}
