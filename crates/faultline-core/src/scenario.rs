//! Fault scenario catalog
//!
//! Static table of `eth_estimateGas` requests engineered to provoke known
//! node error classes. Entries are pure data; lookup is the only logic.
//! Errors that did not come from a scenario enter the pipeline through
//! [`ActiveError::manual`](crate::diagnosis::ActiveError::manual).

use crate::error::{Error, Result};
use crate::protocol::RpcRequest;
use serde_json::{Map, Value};

/// Method every built-in scenario calls
pub const ESTIMATE_GAS_METHOD: &str = "eth_estimateGas";

/// Request id used for simulated requests
pub const SIMULATION_REQUEST_ID: u64 = 1;

const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
const USDT_CONTRACT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

/// Transaction object template passed as the single positional parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxTemplate {
    /// Sender address
    pub from: &'static str,
    /// Recipient address
    pub to: &'static str,
    /// Transferred value (hex wei)
    pub value: Option<&'static str>,
    /// Gas limit (hex)
    pub gas: Option<&'static str>,
}

impl TxTemplate {
    fn to_params(self) -> Vec<Value> {
        let mut object = Map::new();
        object.insert("from".to_string(), Value::from(self.from));
        object.insert("to".to_string(), Value::from(self.to));
        if let Some(value) = self.value {
            object.insert("value".to_string(), Value::from(value));
        }
        if let Some(gas) = self.gas {
            object.insert("gas".to_string(), Value::from(gas));
        }
        vec![Value::Object(object)]
    }
}

/// A predefined request that provokes a specific node error class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioDefinition {
    /// Stable identifier
    pub id: &'static str,
    /// Human-readable title
    pub title: &'static str,
    /// What the request simulates
    pub description: &'static str,
    /// JSON-RPC method
    pub method: &'static str,
    /// Parameter template
    pub params_template: TxTemplate,
    /// Error message a typical node answers with
    pub expected_message: &'static str,
    /// Error code a typical node answers with
    pub expected_code: i64,
}

impl ScenarioDefinition {
    /// Positional parameters for this scenario
    #[must_use]
    pub fn params(&self) -> Vec<Value> {
        self.params_template.to_params()
    }

    /// Build the request for this scenario
    #[must_use]
    pub fn request(&self) -> RpcRequest {
        RpcRequest::new(self.method, SIMULATION_REQUEST_ID).with_params(self.params())
    }

    fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key) || self.title.eq_ignore_ascii_case(key)
    }
}

static SCENARIOS: [ScenarioDefinition; 3] = [
    ScenarioDefinition {
        id: "execution-reverted",
        title: "Execution Reverted",
        description: "Sends 1 ETH to the USDT contract from the zero address; \
                      the contract logic rejects the call.",
        method: ESTIMATE_GAS_METHOD,
        params_template: TxTemplate {
            from: ZERO_ADDRESS,
            to: USDT_CONTRACT,
            value: Some("0xDE0B6B3A7640000"),
            gas: None,
        },
        expected_message: "execution reverted",
        expected_code: -32000,
    },
    ScenarioDefinition {
        id: "insufficient-funds",
        title: "Insufficient Funds",
        description: "Sends 100 ETH from an empty wallet.",
        method: ESTIMATE_GAS_METHOD,
        params_template: TxTemplate {
            from: "0x1111111111111111111111111111111111111111",
            to: "0x2222222222222222222222222222222222222222",
            value: Some("0x56BC75E2D63100000"),
            gas: None,
        },
        expected_message: "insufficient funds",
        expected_code: -32000,
    },
    ScenarioDefinition {
        id: "intrinsic-gas-too-low",
        title: "Intrinsic Gas Too Low",
        description: "Sends a transaction with a gas limit of 10, below the intrinsic cost.",
        method: ESTIMATE_GAS_METHOD,
        params_template: TxTemplate {
            from: ZERO_ADDRESS,
            to: USDT_CONTRACT,
            value: None,
            gas: Some("0xA"),
        },
        expected_message: "intrinsic gas too low",
        expected_code: -32000,
    },
];

/// All built-in scenarios, in display order
#[must_use]
pub fn list_scenarios() -> &'static [ScenarioDefinition] {
    &SCENARIOS
}

/// Look up a scenario by id or title (case-insensitive)
///
/// # Errors
/// Returns [`Error::UnknownScenario`] if nothing matches
pub fn find_scenario(key: &str) -> Result<&'static ScenarioDefinition> {
    let key = key.trim();
    SCENARIOS
        .iter()
        .find(|s| s.matches(key))
        .ok_or_else(|| Error::UnknownScenario(key.to_string()))
}

/// Build the JSON-RPC request for a scenario
///
/// # Errors
/// Returns [`Error::UnknownScenario`] if the id is not in the catalog
pub fn build_request(scenario_id: &str) -> Result<RpcRequest> {
    find_scenario(scenario_id).map(ScenarioDefinition::request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_order_and_ids() {
        let ids: Vec<_> = list_scenarios().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec!["execution-reverted", "insufficient-funds", "intrinsic-gas-too-low"]
        );
        assert!(list_scenarios()
            .iter()
            .all(|s| s.method == ESTIMATE_GAS_METHOD && s.expected_code == -32000));
    }

    #[test]
    fn test_build_request_insufficient_funds() {
        let request = build_request("insufficient-funds").unwrap();

        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.method, "eth_estimateGas");
        assert_eq!(request.id, 1);
        assert_eq!(
            request.params,
            vec![json!({
                "from": "0x1111111111111111111111111111111111111111",
                "to": "0x2222222222222222222222222222222222222222",
                "value": "0x56BC75E2D63100000"
            })]
        );
    }

    #[test]
    fn test_build_request_accepts_title() {
        let by_title = build_request("Insufficient Funds").unwrap();
        let by_id = build_request("insufficient-funds").unwrap();
        assert_eq!(by_title, by_id);
    }

    #[test]
    fn test_intrinsic_gas_has_gas_and_no_value() {
        let request = build_request("intrinsic-gas-too-low").unwrap();
        let tx = request.params[0].as_object().unwrap();
        assert_eq!(tx.get("gas"), Some(&json!("0xA")));
        assert!(!tx.contains_key("value"));
    }

    #[test]
    fn test_build_request_is_deterministic() {
        for scenario in list_scenarios() {
            let first = build_request(scenario.id).unwrap();
            let second = build_request(scenario.id).unwrap();
            assert_eq!(first, second, "scenario {} not deterministic", scenario.id);
        }
    }

    #[test]
    fn test_unknown_scenario() {
        let err = build_request("chain-reorg").unwrap_err();
        assert!(matches!(err, Error::UnknownScenario(ref id) if id == "chain-reorg"));
        assert!(err.is_config());
    }
}
