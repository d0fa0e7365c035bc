//! `diagnose` and `analyze` commands
//!
//! The active error lives here, in the CLI, between the simulation and the
//! diagnosis; the core receives it as a parameter.

use super::simulate::{effective_config, fail_on_transport, simulate_scenario};
use super::{render, AnalyzeArgs, DiagnoseArgs, EndpointArgs};
use crate::app::AppConfig;
use anyhow::Result;
use faultline_core::{
    endpoint_host, ActiveError, Diagnoser, DiagnosisInput, DiagnosisResult, ScenarioDefinition,
    Simulation,
};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    simulation: Option<&'a Simulation>,
    error: &'a ActiveError,
    diagnosis: &'a DiagnosisResult,
}

fn diagnoser(config: &AppConfig) -> Result<Diagnoser> {
    let diagnoser = Diagnoser::openai_from_env(
        config.diagnoser_config(),
        config.llm.base_url.clone(),
        config.llm_timeout(),
    )?;
    Ok(diagnoser)
}

async fn diagnose(
    diagnoser: &Diagnoser,
    endpoint: &str,
    method: &str,
    error: &ActiveError,
) -> DiagnosisResult {
    // The prompt only ever sees the host; endpoint paths often carry tokens
    let input = DiagnosisInput::new(endpoint_host(endpoint), method, error);
    diagnoser.analyze(&input).await
}

pub async fn run_diagnose(args: DiagnoseArgs) -> Result<()> {
    let config = effective_config(&args.endpoint)?;
    // Credential is a precondition: check it before touching the node
    let diagnoser = diagnoser(&config)?;

    let (scenario, simulator, simulation) = simulate_scenario(&config, &args.scenario).await?;

    if !args.json {
        render::print_scenario_header(scenario, simulator.endpoint());
        render::print_simulation(&simulation, args.raw);
    }
    fail_on_transport(&simulation, simulator.timeout())?;

    let Some(active) = ActiveError::from_outcome(&simulation.outcome) else {
        if args.json {
            print_report(Some(scenario), Some(&simulation), None, None)?;
        }
        return Ok(());
    };

    if !args.json {
        render::print_consulting(&diagnoser.config().model);
    }
    let result = diagnose(&diagnoser, simulator.endpoint(), scenario.method, &active).await;

    if args.json {
        print_report(Some(scenario), Some(&simulation), Some(&active), Some(&result))
    } else {
        render::print_diagnosis(&result);
        Ok(())
    }
}

pub async fn run_manual(args: AnalyzeArgs) -> Result<()> {
    let config = effective_config(&EndpointArgs {
        endpoint: args.endpoint.clone(),
        timeout: None,
    })?;
    let diagnoser = diagnoser(&config)?;

    let active = ActiveError::manual(args.code, args.message);
    if !args.json {
        render::print_active_error(&active);
        render::print_consulting(&diagnoser.config().model);
    }

    let result = diagnose(&diagnoser, &config.rpc.endpoint, &args.method, &active).await;

    if args.json {
        print_report(None, None, Some(&active), Some(&result))
    } else {
        render::print_diagnosis(&result);
        Ok(())
    }
}

fn print_report(
    scenario: Option<&ScenarioDefinition>,
    simulation: Option<&Simulation>,
    error: Option<&ActiveError>,
    diagnosis: Option<&DiagnosisResult>,
) -> Result<()> {
    let json = match (error, diagnosis) {
        (Some(error), Some(diagnosis)) => serde_json::to_string_pretty(&Report {
            scenario: scenario.map(|s| s.id),
            simulation,
            error,
            diagnosis,
        })?,
        // Unexpected success: nothing to diagnose
        _ => serde_json::to_string_pretty(&serde_json::json!({
            "scenario": scenario.map(|s| s.id),
            "simulation": simulation,
        }))?,
    };
    println!("{}", json);
    Ok(())
}
