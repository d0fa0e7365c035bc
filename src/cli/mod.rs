//! CLI module for faultline
//!
//! Provides commands:
//! - `scenarios`: list built-in fault scenarios
//! - `simulate`: send a scenario to the node and classify the answer
//! - `diagnose`: simulate, then diagnose the provoked error
//! - `analyze`: diagnose a manually entered error
//! - `doctor`: configuration and credential checks

use clap::{Args, Parser, Subcommand};
use faultline_core::scenario::ESTIMATE_GAS_METHOD;

pub mod analyze;
pub mod doctor;
pub mod render;
pub mod simulate;

/// Blockchain JSON-RPC fault injection and diagnosis
#[derive(Parser, Debug)]
#[command(name = "faultline")]
#[command(about = "Inject JSON-RPC faults and draft a root-cause diagnosis")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in fault scenarios
    Scenarios,
    /// Send a fault scenario to the node and classify the answer
    Simulate(SimulateArgs),
    /// Simulate a scenario, then diagnose the error it provokes
    Diagnose(DiagnoseArgs),
    /// Diagnose a manually entered error code and message
    Analyze(AnalyzeArgs),
    /// Run configuration diagnostics
    Doctor,
}

/// Node endpoint overrides
#[derive(Args, Debug, Clone, Default)]
pub struct EndpointArgs {
    /// JSON-RPC endpoint (overrides configuration)
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Simulation timeout in seconds (overrides configuration)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Scenario id or title (see `faultline scenarios`)
    pub scenario: String,
    #[command(flatten)]
    pub endpoint: EndpointArgs,
    /// Print the raw JSON response body
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    /// Scenario id or title (see `faultline scenarios`)
    pub scenario: String,
    #[command(flatten)]
    pub endpoint: EndpointArgs,
    /// Print the raw JSON response body
    #[arg(long)]
    pub raw: bool,
    /// Emit a machine-readable JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON-RPC error code
    #[arg(long, allow_negative_numbers = true)]
    pub code: i64,
    /// JSON-RPC error message
    #[arg(long)]
    pub message: String,
    /// Method that produced the error
    #[arg(long, default_value = ESTIMATE_GAS_METHOD)]
    pub method: String,
    /// Endpoint the error came from (overrides configuration)
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Emit a machine-readable JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Scenarios) => {
            render::print_scenarios(faultline_core::list_scenarios());
            Ok(())
        }
        Some(Commands::Simulate(args)) => simulate::run(args).await,
        Some(Commands::Diagnose(args)) => analyze::run_diagnose(args).await,
        Some(Commands::Analyze(args)) => analyze::run_manual(args).await,
        Some(Commands::Doctor) => doctor::run().await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
