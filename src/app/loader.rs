//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Endpoint variable used by hosted-node setups
const LEGACY_ENDPOINT_VAR: &str = "QUICKNODE_RPC_URL";

fn defaults() -> ConfigBuilder<config::builder::DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn legacy_endpoint() -> Option<String> {
    std::env::var(LEGACY_ENDPOINT_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Embedded defaults with the legacy endpoint layered directly above them,
/// so every config file and `FAULTLINE_*` variable still wins
fn base(
    legacy_endpoint: Option<String>,
) -> Result<ConfigBuilder<config::builder::DefaultState>> {
    let legacy = Config::builder()
        .set_override_option("rpc.endpoint", legacy_endpoint)
        .context("Failed to apply legacy endpoint")?
        .build()
        .context("Failed to build legacy endpoint layer")?;

    Ok(defaults().add_source(legacy))
}

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let config = base(legacy_endpoint())?
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            File::with_name(&format!(
                "config/{}",
                std::env::var("FAULTLINE_ENV").unwrap_or_else(|_| "development".to_string())
            ))
            .required(false),
        )
        .add_source(File::with_name("config/local").required(false))
        // FAULTLINE_RPC__ENDPOINT -> rpc.endpoint
        .add_source(
            Environment::with_prefix("FAULTLINE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults() {
        let config: AppConfig = defaults().build().unwrap().try_deserialize().unwrap();

        assert_eq!(config.rpc.endpoint, "https://eth.llamarpc.com");
        assert_eq!(config.rpc.timeout_secs, 5);
        assert_eq!(config.llm.model, "gpt-4.1-mini");
        assert_eq!(config.llm.max_tokens, 400);
        assert!((config.llm.temperature - 0.3).abs() < f32::EPSILON);
        assert!(config.llm.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let overrides = r#"
            [rpc]
            endpoint = "http://127.0.0.1:8545"
            timeout_secs = 2
        "#;
        let config: AppConfig = defaults()
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.rpc.endpoint, "http://127.0.0.1:8545");
        assert_eq!(config.rpc.timeout_secs, 2);
        assert_eq!(config.llm.model, "gpt-4.1-mini");
    }

    #[test]
    fn test_legacy_endpoint_replaces_default() {
        let config: AppConfig = base(Some("https://node.example.com/token".to_string()))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.rpc.endpoint, "https://node.example.com/token");
        assert_eq!(config.rpc.timeout_secs, 5);
    }

    #[test]
    fn test_file_layer_beats_legacy_endpoint() {
        let local = r#"
            [rpc]
            endpoint = "http://127.0.0.1:8545"
        "#;
        let config: AppConfig = base(Some("https://node.example.com/token".to_string()))
            .unwrap()
            .add_source(File::from_str(local, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.rpc.endpoint, "http://127.0.0.1:8545");
    }

    #[test]
    fn test_absent_legacy_endpoint_keeps_default() {
        let config: AppConfig = base(None)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.rpc.endpoint, "https://eth.llamarpc.com");
    }
}
