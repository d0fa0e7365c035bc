//! `doctor` command: configuration and credential checks

use crate::app::{load_config, AppConfig};
use faultline_core::endpoint_host;
use faultline_llm::util::{mask_api_key, validate_api_key};
use std::path::Path;

pub async fn run() -> anyhow::Result<()> {
    println!("🏥 faultline doctor\n");

    let mut all_ok = true;

    check_env_file();
    all_ok &= check_api_key();
    match check_config() {
        Some(config) => {
            println!("  🔌 RPC endpoint: `{}`", endpoint_host(&config.rpc.endpoint));
            println!("  ⏱️  Simulation timeout: {}s", config.rpc.timeout_secs);
            println!(
                "  🤖 Model: {} (max {} tokens, temperature {})",
                config.llm.model, config.llm.max_tokens, config.llm.temperature
            );
        }
        None => all_ok = false,
    }

    println!();
    if all_ok {
        println!("✅ All checks passed! Ready to diagnose.");
        Ok(())
    } else {
        anyhow::bail!("some checks failed, fix the issues above")
    }
}

fn check_env_file() {
    print!("Checking .env file... ");
    if Path::new(".env").exists() {
        println!("✅ Found");
    } else {
        println!("⚠️  Not found (environment variables only)");
    }
}

fn check_api_key() -> bool {
    print!("Checking OPENAI_API_KEY... ");
    let key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    match validate_api_key(&key, "OpenAI") {
        None => {
            println!("✅ {}", mask_api_key(&key));
            true
        }
        Some(reason) => {
            println!("❌ {}", reason);
            false
        }
    }
}

fn check_config() -> Option<AppConfig> {
    print!("Checking configuration... ");
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ {:#}", e);
            return None;
        }
    };
    match config.validate() {
        Ok(()) => {
            println!("✅ Valid");
            Some(config)
        }
        Err(e) => {
            println!("❌ {}", e);
            None
        }
    }
}
