//! Faultline Core - Fault Simulation & Diagnosis Pipeline
//!
//! This crate provides the core pipeline of faultline:
//! - Scenario: catalog of request templates that provoke known node errors
//! - Simulator: sends a JSON-RPC request and classifies the node's answer
//! - Prompt: turns an error tuple into a fixed-schema instruction pair
//! - Parser: extracts the two-field diagnosis from raw model output
//! - Diagnosis: composes the above into a call that always yields a result

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diagnosis;
pub mod error;
pub mod parser;
pub mod prompt;
pub mod protocol;
pub mod scenario;
pub mod simulator;

pub use diagnosis::{
    ActiveError, Diagnoser, DiagnoserConfig, DiagnosisInput, DiagnosisResult, DiagnosisSource,
};
pub use error::{Error, Result};
pub use parser::{parse_diagnosis, ParsedDiagnosis};
pub use prompt::{build_prompt, DiagnosticPrompt};
pub use protocol::{RpcOutcome, RpcRequest};
pub use scenario::{build_request, find_scenario, list_scenarios, ScenarioDefinition};
pub use simulator::{endpoint_host, Simulation, Simulator, DEFAULT_TIMEOUT};
