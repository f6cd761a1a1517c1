//! Caller-facing chat types.
//!
//! These model the JSON exchanged on `POST /api/chat`: the incoming message
//! with its prior turns, and the single-element reply list sent back.
//!
//! Turn deserialization is lenient. Front-ends send whatever they stored
//! locally, so any JSON value is accepted as a turn: a missing or non-string
//! `content` becomes empty text, any `sender` other than `"user"` is read as
//! the bot, and a non-object entry is an empty bot turn. Only the trailing
//! window of turns is ever forwarded, so a malformed old entry never rejects
//! a request.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a historical turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    #[default]
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// One historical message supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ChatTurn {
    pub content: String,
    pub sender: Sender,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::Bot,
        }
    }
}

/// Body of `POST /api/chat`.
///
/// Both fields are optional at the type level so the handler can report a
/// missing message with its own error text instead of a serde message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

impl ChatRequest {
    /// Caller-supplied history, empty when absent or `null`.
    pub fn history(&self) -> &[ChatTurn] {
        self.history.as_deref().unwrap_or_default()
    }
}

/// One element of the reply list: `[{"text": "..."}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyText {
    pub text: String,
}

impl ReplyText {
    /// The full reply body: a list holding exactly one text element.
    pub fn body(text: impl Into<String>) -> Vec<ReplyText> {
        vec![ReplyText { text: text.into() }]
    }
}

impl From<Value> for ChatTurn {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return ChatTurn::bot(String::new());
        };

        let content = match fields.remove("content") {
            Some(Value::String(text)) => text,
            _ => String::new(),
        };
        let sender = match fields.get("sender").and_then(Value::as_str) {
            Some("user") => Sender::User,
            _ => Sender::Bot,
        };
        Self { content, sender }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_deserializes_user_and_bot() {
        let user: ChatTurn =
            serde_json::from_value(json!({"content": "hi", "sender": "user"})).unwrap();
        assert_eq!(user, ChatTurn::user("hi"));

        let bot: ChatTurn =
            serde_json::from_value(json!({"content": "hello", "sender": "bot"})).unwrap();
        assert_eq!(bot, ChatTurn::bot("hello"));
    }

    #[test]
    fn test_unknown_sender_is_bot() {
        for sender in [json!("assistant"), json!("USER"), json!(null), json!(3)] {
            let turn: ChatTurn =
                serde_json::from_value(json!({"content": "x", "sender": sender})).unwrap();
            assert_eq!(turn.sender, Sender::Bot);
        }

        let missing: ChatTurn = serde_json::from_value(json!({"content": "x"})).unwrap();
        assert_eq!(missing.sender, Sender::Bot);
    }

    #[test]
    fn test_missing_or_non_text_content_is_empty() {
        let missing: ChatTurn = serde_json::from_value(json!({"sender": "user"})).unwrap();
        assert_eq!(missing.content, "");

        let number: ChatTurn =
            serde_json::from_value(json!({"content": 42, "sender": "user"})).unwrap();
        assert_eq!(number.content, "");
    }

    #[test]
    fn test_non_object_turn_is_empty_bot_turn() {
        for entry in [json!(null), json!("hello"), json!(7), json!([1, 2])] {
            let turn: ChatTurn = serde_json::from_value(entry).unwrap();
            assert_eq!(turn, ChatTurn::bot(""));
        }
    }

    #[test]
    fn test_request_accepts_malformed_history_entries() {
        let req: ChatRequest = serde_json::from_value(json!({
            "message": "hi",
            "history": [null, "stray", {"content": "Do you sell mice?", "sender": "user"}]
        }))
        .unwrap();
        assert_eq!(
            req.history(),
            &[
                ChatTurn::bot(""),
                ChatTurn::bot(""),
                ChatTurn::user("Do you sell mice?")
            ]
        );
    }

    #[test]
    fn test_request_history_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_value(json!({"message": "hi"})).unwrap();
        assert!(req.history().is_empty());

        let req: ChatRequest =
            serde_json::from_value(json!({"message": "hi", "history": null})).unwrap();
        assert!(req.history().is_empty());
    }

    #[test]
    fn test_request_without_message() {
        let req: ChatRequest = serde_json::from_value(json!({"history": []})).unwrap();
        assert!(req.message.is_none());
    }

    #[test]
    fn test_reply_body_shape() {
        let body = serde_json::to_value(ReplyText::body("hello")).unwrap();
        assert_eq!(body, json!([{"text": "hello"}]));
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }
}
