//! Terminal rendering for simulation and diagnosis results

use faultline_core::{
    endpoint_host, ActiveError, DiagnosisResult, RpcOutcome, ScenarioDefinition, Simulation,
};

pub fn print_scenarios(scenarios: &[ScenarioDefinition]) {
    println!("📋 Fault scenarios\n");
    for scenario in scenarios {
        println!("  {:<24} {}", scenario.id, scenario.title);
        println!("  {:<24} {}", "", scenario.description);
        println!(
            "  {:<24} Expected: `{}` ({})\n",
            "", scenario.expected_message, scenario.expected_code
        );
    }
    println!("Use `faultline analyze --code <CODE> --message <MESSAGE>` for errors from elsewhere.");
}

pub fn print_scenario_header(scenario: &ScenarioDefinition, endpoint: &str) {
    println!("💉 Injecting fault: {}", scenario.title);
    println!("   {}", scenario.description);
    println!("🔌 Connected to: `{}`\n", endpoint_host(endpoint));
}

pub fn print_simulation(simulation: &Simulation, raw: bool) {
    match &simulation.outcome {
        RpcOutcome::RpcError { code, message } => {
            println!("❌ RPC error caught ({} ms)", simulation.elapsed.as_millis());
            println!("   Code:    `{}`", code);
            println!("   Message: `{}`", message);
        }
        RpcOutcome::Success { result } => {
            println!("⚠️  Transaction succeeded (unexpected)");
            println!("   Result: {}", result);
        }
        RpcOutcome::TransportFailure { cause } => {
            println!("🔌 Connection failed: {}", cause);
        }
    }

    if raw {
        println!("\n🛠️  Raw JSON response:");
        match &simulation.raw {
            Some(body) => match serde_json::to_string_pretty(body) {
                Ok(pretty) => println!("{}", pretty),
                Err(_) => println!("{}", body),
            },
            None => println!("(no JSON body)"),
        }
    }
    println!();
}

pub fn print_active_error(error: &ActiveError) {
    println!("✍️  Manual error");
    println!("   Code:    `{}`", error.code);
    println!("   Message: `{}`\n", error.message);
}

pub fn print_consulting(model: &str) {
    println!("🤖 Consulting {}...\n", model);
}

pub fn print_diagnosis(result: &DiagnosisResult) {
    if result.is_degraded() {
        println!("⚠️  Diagnosis unavailable, showing placeholder\n");
    }
    println!("🔍 Root Cause (Internal Note)");
    println!("{}\n", result.root_cause);
    println!("📝 Drafted Client Response");
    println!("{}", result.client_reply);
}
