//! faultline - JSON-RPC fault injection and diagnosis
//!
//! CLI entry point.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `--json` output stays clean on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faultline=warn,faultline_core=warn,faultline_llm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();
    cli::run(cli).await
}
