//! Diagnosis response parser
//!
//! Two stages, strictly ordered: the whole text as a JSON object, then the
//! first fenced block (optionally tagged `json`) holding a brace-delimited
//! body. Nothing else is tolerated.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```")
        .expect("FENCED_OBJECT is a compile-time constant")
});

/// Shape the model is asked for; anything else is rejected
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDiagnosis {
    root_cause: String,
    client_reply: String,
}

/// Validated two-field diagnosis extracted from model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDiagnosis {
    root_cause: String,
    client_reply: String,
}

impl ParsedDiagnosis {
    /// Validating constructor: both fields must be non-blank
    ///
    /// # Errors
    /// Returns [`Error::MalformedOutput`] when either field is blank
    pub fn new(root_cause: impl Into<String>, client_reply: impl Into<String>) -> Result<Self> {
        let root_cause = root_cause.into();
        let client_reply = client_reply.into();

        if root_cause.trim().is_empty() {
            return Err(Error::MalformedOutput("root_cause is empty".to_string()));
        }
        if client_reply.trim().is_empty() {
            return Err(Error::MalformedOutput("client_reply is empty".to_string()));
        }

        Ok(Self {
            root_cause,
            client_reply,
        })
    }

    /// Technical one-sentence explanation
    #[must_use]
    pub fn root_cause(&self) -> &str {
        &self.root_cause
    }

    /// Customer-facing markdown reply
    #[must_use]
    pub fn client_reply(&self) -> &str {
        &self.client_reply
    }

    /// Split into `(root_cause, client_reply)`
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.root_cause, self.client_reply)
    }
}

fn parse_object(text: &str) -> Result<ParsedDiagnosis> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| Error::MalformedOutput(e.to_string()))?;
    // Derived struct impls also accept sequences; only a map is a diagnosis
    if !value.is_object() {
        return Err(Error::MalformedOutput(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    let raw: RawDiagnosis =
        serde_json::from_value(value).map_err(|e| Error::MalformedOutput(e.to_string()))?;
    ParsedDiagnosis::new(raw.root_cause, raw.client_reply)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extract the diagnosis object from raw model output
///
/// # Errors
/// Returns [`Error::MalformedOutput`] if neither the whole text nor the
/// first fenced block is a valid diagnosis object
pub fn parse_diagnosis(raw: &str) -> Result<ParsedDiagnosis> {
    if let Ok(parsed) = parse_object(raw) {
        return Ok(parsed);
    }

    match FENCED_OBJECT.captures(raw).and_then(|c| c.get(1)) {
        Some(body) => parse_object(body.as_str()).map_err(|e| match e {
            Error::MalformedOutput(reason) => {
                Error::MalformedOutput(format!("fenced block rejected: {}", reason))
            }
            other => other,
        }),
        None => Err(Error::MalformedOutput(
            "model did not return valid JSON".to_string(),
        )),
    }
}
