//! Chat transcript model. Append-only from the core's perspective.

use crate::model::validation::{check_text_len, ValidationError};
use crate::store::{Document, ResourceKey};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text_len("message text", &self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatDocument {
    pub messages: Vec<ChatMessage>,
}

impl Document for ChatDocument {
    const KEY: ResourceKey = ResourceKey::Chat;

    fn from_lenient(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };
        let entries = match map.remove("messages") {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        };
        let total = entries.len();
        let messages: Vec<ChatMessage> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if messages.len() < total {
            warn!(
                "event=chat_decode module=model status=dropped count={}",
                total - messages.len()
            );
        }
        Some(Self { messages })
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatDocument, ChatRole};
    use crate::store::Document;
    use serde_json::json;

    #[test]
    fn unknown_roles_are_dropped_on_read() {
        let raw = json!({"messages": [
            {"role": "user", "text": "hi"},
            {"role": "system", "text": "ignored"},
            {"role": "assistant", "text": "hello"}
        ]});
        let document = ChatDocument::from_lenient(raw).unwrap();
        let roles: Vec<ChatRole> = document.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant]);
    }
}
