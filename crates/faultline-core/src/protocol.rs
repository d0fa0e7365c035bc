//! JSON-RPC 2.0 protocol types
//!
//! Request envelope sent to the node and the classification of whatever
//! comes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version
    pub jsonrpc: String,
    /// Request method
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
    /// Request ID
    pub id: u64,
}

impl RpcRequest {
    /// Create a new request with no parameters
    pub fn new(method: impl Into<String>, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params: Vec::new(),
            id,
        }
    }

    /// Set positional parameters
    #[must_use]
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Additional data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Outcome of a single simulated request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RpcOutcome {
    /// Node answered with a result
    Success {
        /// `result` member of the response (null when absent)
        result: Value,
    },
    /// Node answered with a well-formed JSON-RPC error
    RpcError {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
    /// No usable JSON-RPC answer was obtained
    TransportFailure {
        /// Description of the underlying failure
        cause: String,
    },
}

impl RpcOutcome {
    /// Transport failure with the given cause
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::TransportFailure {
            cause: cause.into(),
        }
    }

    /// Classify a parsed response body.
    ///
    /// An `error` member wins over `result`. A null `error` counts as absent.
    #[must_use]
    pub fn classify(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::transport(format!(
                "unexpected response shape: expected a JSON object, got {}",
                json_kind(body)
            ));
        };

        match object.get("error") {
            Some(error) if !error.is_null() => {
                match serde_json::from_value::<RpcErrorObject>(error.clone()) {
                    Ok(err) => Self::RpcError {
                        code: err.code,
                        message: err.message,
                    },
                    Err(e) => Self::transport(format!("malformed error object: {}", e)),
                }
            }
            _ => Self::Success {
                result: object.get("result").cloned().unwrap_or(Value::Null),
            },
        }
    }

    /// Short label for display and logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::RpcError { .. } => "rpc_error",
            Self::TransportFailure { .. } => "transport_failure",
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_envelope() {
        let request = RpcRequest::new("eth_estimateGas", 1).with_params(vec![json!({"gas": "0xA"})]);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "jsonrpc": "2.0",
                "method": "eth_estimateGas",
                "params": [{"gas": "0xA"}],
                "id": 1
            })
        );
    }

    #[test]
    fn test_classify_error() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "insufficient funds"}
        });
        assert_eq!(
            RpcOutcome::classify(&body),
            RpcOutcome::RpcError {
                code: -32000,
                message: "insufficient funds".to_string()
            }
        );
    }

    #[test]
    fn test_classify_error_wins_over_result() {
        let body = json!({"result": "0x5208", "error": {"code": 3, "message": "execution reverted", "data": "0x"}});
        assert!(matches!(
            RpcOutcome::classify(&body),
            RpcOutcome::RpcError { code: 3, .. }
        ));
    }

    #[test]
    fn test_classify_success() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": "0x5208"});
        assert_eq!(
            RpcOutcome::classify(&body),
            RpcOutcome::Success {
                result: json!("0x5208")
            }
        );

        let null_error = json!({"result": "0x1", "error": null});
        assert_eq!(RpcOutcome::classify(&null_error).kind(), "success");
    }

    #[test]
    fn test_classify_malformed_error_is_transport_failure() {
        let body = json!({"error": {"message": "no code here"}});
        match RpcOutcome::classify(&body) {
            RpcOutcome::TransportFailure { cause } => {
                assert!(cause.starts_with("malformed error object"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_classify_non_object() {
        let outcome = RpcOutcome::classify(&json!([1, 2]));
        match outcome {
            RpcOutcome::TransportFailure { cause } => assert!(cause.contains("array")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let outcome = RpcOutcome::transport("timeout");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"kind": "transport_failure", "cause": "timeout"})
        );
    }
}
