//! `simulate` command and the shared simulation step

use super::{render, EndpointArgs, SimulateArgs};
use crate::app::{load_config, AppConfig};
use anyhow::{bail, Context, Result};
use faultline_core::{find_scenario, RpcOutcome, ScenarioDefinition, Simulation, Simulator};
use std::time::Duration;
use tracing::info;

/// Configuration with CLI endpoint overrides applied and validated
pub fn effective_config(overrides: &EndpointArgs) -> Result<AppConfig> {
    let mut config = load_config()?;
    if let Some(endpoint) = &overrides.endpoint {
        config.rpc.endpoint = endpoint.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.rpc.timeout_secs = timeout;
    }
    config.validate()?;
    Ok(config)
}

/// Look up `scenario` and run it once against the configured node
pub async fn simulate_scenario(
    config: &AppConfig,
    scenario: &str,
) -> Result<(&'static ScenarioDefinition, Simulator, Simulation)> {
    let scenario = find_scenario(scenario)?;
    let simulator = Simulator::new(&config.rpc.endpoint, config.rpc_timeout())
        .context("Failed to create simulator")?;

    info!(scenario = scenario.id, "Injecting fault");
    let simulation = simulator.run(&scenario.request()).await;
    Ok((scenario, simulator, simulation))
}

/// Turn a transport failure into the command's error
pub fn fail_on_transport(simulation: &Simulation, timeout: Duration) -> Result<()> {
    if let RpcOutcome::TransportFailure { cause } = &simulation.outcome {
        if cause == "timeout" {
            bail!("transport failure: no answer within {}s", timeout.as_secs());
        }
        bail!("transport failure: {}", cause);
    }
    Ok(())
}

pub async fn run(args: SimulateArgs) -> Result<()> {
    let config = effective_config(&args.endpoint)?;
    let (scenario, simulator, simulation) = simulate_scenario(&config, &args.scenario).await?;

    render::print_scenario_header(scenario, simulator.endpoint());
    render::print_simulation(&simulation, args.raw);
    fail_on_transport(&simulation, simulator.timeout())
}
