//! Diagnostic prompt builder
//!
//! Substitutes the error tuple into a fixed instruction template. The only
//! variation between calls is the four substituted values.

use crate::diagnosis::DiagnosisInput;

/// Sign-off block appended to client replies: blank line, salutation,
/// blank line, closing line
pub const SIGN_OFF_BLOCK: &str = "\n\nBest regards,\n\nSupport Team";

const SYSTEM_INSTRUCTIONS: &str = "You are a Senior Support Engineer at a blockchain \
infrastructure provider. You diagnose JSON-RPC errors returned by blockchain nodes. \
Output valid JSON only.";

/// System/user instruction pair sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticPrompt {
    /// System role instructions
    pub system: String,
    /// User role instructions carrying the error context
    pub user: String,
}

/// Build the instruction pair for one error
#[must_use]
pub fn build_prompt(input: &DiagnosisInput) -> DiagnosticPrompt {
    let user = format!(
        r#"[CONTEXT]
Endpoint: {endpoint}
Method: {method}
Error Code: {code}
Error Message: "{message}"

[TASK]
Output only a JSON object with exactly two string keys and no other keys:
1. "root_cause": a technical, one-sentence explanation of the error (internal note).
2. "client_reply": a polite, professional markdown response to the customer.
   - Do not claim to represent or be affiliated with any specific company.
   - End the reply with exactly this sign-off:{sign_off}"#,
        endpoint = input.endpoint,
        method = input.method,
        code = input.code,
        message = input.message,
        sign_off = SIGN_OFF_BLOCK,
    );

    DiagnosticPrompt {
        system: SYSTEM_INSTRUCTIONS.to_string(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> DiagnosisInput {
        DiagnosisInput {
            endpoint: "https://node.example.com".to_string(),
            method: "eth_estimateGas".to_string(),
            code: -32000,
            message: "insufficient funds".to_string(),
        }
    }

    #[test]
    fn test_prompt_substitutes_all_inputs() {
        let prompt = build_prompt(&input());

        assert!(prompt.user.contains("Endpoint: https://node.example.com"));
        assert!(prompt.user.contains("Method: eth_estimateGas"));
        assert!(prompt.user.contains("Error Code: -32000"));
        assert!(prompt.user.contains(r#"Error Message: "insufficient funds""#));
    }

    #[test]
    fn test_prompt_fixes_output_schema() {
        let prompt = build_prompt(&input());

        assert!(prompt.system.contains("Support Engineer"));
        assert!(prompt.system.contains("JSON only"));
        assert!(prompt.user.contains(r#""root_cause""#));
        assert!(prompt.user.contains(r#""client_reply""#));
        assert!(prompt.user.contains("affiliated with any specific company"));
        assert!(prompt.user.ends_with(SIGN_OFF_BLOCK));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&input()), build_prompt(&input()));
    }

    #[test]
    fn test_only_values_differ_between_errors() {
        let mut other = input();
        other.code = 3;
        other.message = "execution reverted".to_string();

        let a = build_prompt(&input());
        let b = build_prompt(&other);
        assert_eq!(a.system, b.system);
        assert_eq!(
            a.user
                .replace("-32000", "3")
                .replace("insufficient funds", "execution reverted"),
            b.user
        );
    }
}
