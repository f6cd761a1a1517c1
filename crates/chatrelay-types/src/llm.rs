//! Provider-facing request/response types for chatrelay.
//!
//! These types model the data shapes at the provider boundary: the
//! normalized conversation history, safety filter settings, the tagged
//! reply produced by a provider adapter, and provider errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chat::{ChatTurn, Sender};

/// Role of a turn in the provider's conversation format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

/// A single text segment of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

/// A conversation turn in the provider's shape:
/// `{"role": "user"|"model", "parts": [{"text": "..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTurn {
    pub role: Role,
    pub parts: Vec<TextPart>,
}

impl NormalizedTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![TextPart { text: text.into() }],
        }
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

impl From<&ChatTurn> for NormalizedTurn {
    fn from(turn: &ChatTurn) -> Self {
        let role = match turn.sender {
            Sender::User => Role::User,
            Sender::Bot => Role::Model,
        };
        NormalizedTurn::new(role, turn.content.clone())
    }
}

/// Harm categories the safety filter is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ];
}

/// Blocking threshold applied to a harm category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    #[default]
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

impl fmt::Display for HarmBlockThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarmBlockThreshold::BlockLowAndAbove => write!(f, "BLOCK_LOW_AND_ABOVE"),
            HarmBlockThreshold::BlockMediumAndAbove => write!(f, "BLOCK_MEDIUM_AND_ABOVE"),
            HarmBlockThreshold::BlockOnlyHigh => write!(f, "BLOCK_ONLY_HIGH"),
            HarmBlockThreshold::BlockNone => write!(f, "BLOCK_NONE"),
        }
    }
}

/// One entry of the safety filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// The same threshold applied to every [`HarmCategory`].
    pub fn for_all_categories(threshold: HarmBlockThreshold) -> Vec<SafetySetting> {
        HarmCategory::ALL
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold,
            })
            .collect()
    }
}

/// A single-shot conversation request: open a session seeded with
/// `history`, then send `message` under `safety_settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub history: Vec<NormalizedTurn>,
    pub message: String,
    pub safety_settings: Vec<SafetySetting>,
}

/// The provider's reply, classified by the adapter at the provider boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// One or more content segments, in order.
    TextSegments(Vec<String>),
    /// A single aggregate text field.
    AggregateText(String),
    /// The prompt was blocked by the provider's safety filter.
    Blocked {
        reason: Option<String>,
        message: Option<String>,
    },
    /// A successful response in a shape the adapter does not recognize.
    Unrecognized { raw: serde_json::Value },
}

impl ProviderReply {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderReply::TextSegments(_) => "text_segments",
            ProviderReply::AggregateText(_) => "aggregate_text",
            ProviderReply::Blocked { .. } => "blocked",
            ProviderReply::Unrecognized { .. } => "unrecognized",
        }
    }
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("provider configuration error: {0}")]
    Configuration(String),
}
