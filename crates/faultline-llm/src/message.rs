//! Message types for chat completions

use serde::{Deserialize, Serialize};

/// Role in a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (instructions)
    System,
    /// User message
    User,
}

/// A role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let system = Message::system("You are a support engineer");
        assert_eq!(system.role, MessageRole::System);

        let user = Message::user("Diagnose this");
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.content, "Diagnose this");
    }

    #[test]
    fn test_message_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::system("x")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"x"}"#);
        let role: MessageRole = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(role, MessageRole::User);
    }
}
