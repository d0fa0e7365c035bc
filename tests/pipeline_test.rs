//! End-to-end tests for the fault simulation and diagnosis pipeline
//!
//! Scenario catalog -> simulator (stub node) -> diagnoser (stub model),
//! with the active error carried by the test the way the CLI carries it.

use std::sync::Arc;
use std::time::Duration;

use faultline_core::{
    build_request, ActiveError, Diagnoser, DiagnoserConfig, DiagnosisInput, DiagnosisResult,
    DiagnosisSource, RpcOutcome, Simulator,
};
use faultline_llm::{MockProvider, OpenAiConfig, OpenAiProvider};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_REPLY: &str = r#"{"root_cause":"Sender balance lower than transfer value","client_reply":"Hello,\n\nThe sending wallet does not hold enough ETH to cover the transfer value.\n\nBest regards,\n\nSupport Team"}"#;

async fn stub_node() -> MockServer {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "insufficient funds"}
        })))
        .mount(&node)
        .await;
    node
}

fn expected_result() -> DiagnosisResult {
    DiagnosisResult {
        root_cause: "Sender balance lower than transfer value".to_string(),
        client_reply: "Hello,\n\nThe sending wallet does not hold enough ETH to cover the transfer value.\n\nBest regards,\n\nSupport Team".to_string(),
        source: DiagnosisSource::Ai,
    }
}

#[tokio::test]
async fn test_insufficient_funds_end_to_end() {
    let node = stub_node().await;

    let request = build_request("Insufficient Funds").unwrap();
    assert_eq!(
        request.params,
        vec![json!({
            "from": "0x1111111111111111111111111111111111111111",
            "to": "0x2222222222222222222222222222222222222222",
            "value": "0x56BC75E2D63100000"
        })]
    );

    let simulator = Simulator::new(node.uri(), Duration::from_secs(5)).unwrap();
    let outcome = simulator.simulate(&request).await;
    assert_eq!(
        outcome,
        RpcOutcome::RpcError {
            code: -32000,
            message: "insufficient funds".to_string()
        }
    );

    let active = ActiveError::from_outcome(&outcome).unwrap();

    let model = MockProvider::new();
    model.add_response(MODEL_REPLY);
    let diagnoser = Diagnoser::new(Arc::new(model), DiagnoserConfig::default());

    let input = DiagnosisInput::new(node.uri(), &request.method, &active);
    let result = diagnoser.analyze(&input).await;

    assert_eq!(result, expected_result());
}

#[tokio::test]
async fn test_end_to_end_with_openai_compatible_stub() {
    let node = stub_node().await;
    let model_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-e2e",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4.1-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": MODEL_REPLY },
                "finish_reason": "stop",
                "logprobs": null
            }]
        })))
        .expect(1)
        .mount(&model_server)
        .await;

    let request = build_request("insufficient-funds").unwrap();
    let simulator = Simulator::new(node.uri(), Duration::from_secs(5)).unwrap();
    let outcome = simulator.simulate(&request).await;
    let active = ActiveError::from_outcome(&outcome).unwrap();

    let provider = OpenAiProvider::new(
        OpenAiConfig::new("sk-test-key-0123456789").with_base_url(model_server.uri()),
    )
    .unwrap();
    let diagnoser = Diagnoser::new(Arc::new(provider), DiagnoserConfig::default());

    let result = diagnoser
        .analyze(&DiagnosisInput::new(node.uri(), &request.method, &active))
        .await;

    assert_eq!(result, expected_result());
}

#[tokio::test]
async fn test_model_outage_still_yields_displayable_result() {
    let model_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&model_server)
        .await;

    let provider = OpenAiProvider::new(
        OpenAiConfig::new("sk-test-key-0123456789")
            .with_base_url(model_server.uri())
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap();
    let diagnoser = Diagnoser::new(Arc::new(provider), DiagnoserConfig::default());

    let result = diagnoser
        .analyze(&DiagnosisInput::new(
            "https://node.example.com",
            "eth_estimateGas",
            &ActiveError::manual(3, "execution reverted"),
        ))
        .await;

    assert_eq!(result.root_cause, "AI Processing Failed");
    assert!(result.client_reply.starts_with("System Error: "));
    assert_eq!(result.source, DiagnosisSource::Degraded);
}

#[tokio::test]
async fn test_timeout_halts_before_diagnosis() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": "0x5208"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&node)
        .await;

    let simulator = Simulator::new(node.uri(), Duration::from_millis(250)).unwrap();
    let outcome = simulator
        .simulate(&build_request("intrinsic-gas-too-low").unwrap())
        .await;

    assert_eq!(outcome, RpcOutcome::transport("timeout"));
    assert!(ActiveError::from_outcome(&outcome).is_none());
}
