//! RPC fault simulator
//!
//! Sends one JSON-RPC request per call and classifies the outcome. There is
//! no retry: a node or network problem comes back as
//! [`RpcOutcome::TransportFailure`] on the first attempt.

use crate::error::{Error, Result};
use crate::protocol::{RpcOutcome, RpcRequest};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Default bound for a single simulation round trip
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of one simulation, with the raw body kept for debug display
#[derive(Debug, Clone, Serialize)]
pub struct Simulation {
    /// Classified outcome
    pub outcome: RpcOutcome,
    /// Parsed response body, when the node sent valid JSON
    pub raw: Option<Value>,
    /// Wall-clock time spent on the round trip
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

/// Sends simulated requests to one node endpoint
#[derive(Clone)]
pub struct Simulator {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("endpoint", &endpoint_host(&self.endpoint))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Simulator {
    /// Create a simulator for `endpoint` bounded by `timeout`
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] for a zero timeout or if the HTTP
    /// client cannot be built
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::InvalidConfig {
                field: "rpc.timeout".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InvalidConfig {
                field: "rpc.timeout".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Endpoint this simulator targets
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Configured timeout bound
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `request` and classify the answer
    pub async fn simulate(&self, request: &RpcRequest) -> RpcOutcome {
        self.run(request).await.outcome
    }

    /// Send `request`, classify the answer, and keep the raw body
    #[instrument(skip(self, request), fields(host = %endpoint_host(&self.endpoint), method = %request.method))]
    pub async fn run(&self, request: &RpcRequest) -> Simulation {
        let started = Instant::now();
        let (outcome, raw) = self.exchange(request).await;
        let elapsed = started.elapsed();

        match &outcome {
            RpcOutcome::RpcError { code, message } => {
                info!(code, rpc_message = %message, elapsed_ms = elapsed.as_millis() as u64, "RPC error caught")
            }
            RpcOutcome::Success { .. } => {
                info!(elapsed_ms = elapsed.as_millis() as u64, "Request succeeded")
            }
            RpcOutcome::TransportFailure { cause } => {
                warn!(cause = %cause, elapsed_ms = elapsed.as_millis() as u64, "Transport failure")
            }
        }

        Simulation {
            outcome,
            raw,
            elapsed,
        }
    }

    async fn exchange(&self, request: &RpcRequest) -> (RpcOutcome, Option<Value>) {
        debug!("Sending JSON-RPC request");

        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => return (RpcOutcome::transport(describe_reqwest_error(e)), None),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return (RpcOutcome::transport(describe_reqwest_error(e)), None),
        };

        // Nodes often answer JSON-RPC errors with non-2xx statuses, so the
        // body decides the outcome, not the status.
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => (RpcOutcome::classify(&body), Some(body)),
            Err(e) => (
                RpcOutcome::transport(format!(
                    "invalid JSON response (HTTP {}): {}",
                    status.as_u16(),
                    e
                )),
                None,
            ),
        }
    }
}

fn describe_reqwest_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        return "timeout".to_string();
    }
    // Endpoint URLs may embed credentials; never echo them
    let e = e.without_url();
    if e.is_connect() {
        format!("connection failed: {}", e)
    } else if e.is_builder() {
        format!("invalid endpoint: {}", e)
    } else {
        format!("request failed: {}", e)
    }
}

/// Host part of an endpoint URL, safe to log or display
///
/// # Examples
/// ```
/// use faultline_core::endpoint_host;
/// assert_eq!(endpoint_host("https://node.example.com/abc123secret/"), "node.example.com");
/// assert_eq!(endpoint_host("not a url"), "<invalid endpoint>");
/// ```
#[must_use]
pub fn endpoint_host(endpoint: &str) -> String {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| {
            url.host_str().map(|host| match url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            })
        })
        .unwrap_or_else(|| "<invalid endpoint>".to_string())
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
