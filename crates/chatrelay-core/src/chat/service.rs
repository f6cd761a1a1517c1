//! Relay service: one provider call per chat request.
//!
//! `RelayService` normalizes the caller's history, sends the new message to
//! the provider under the fixed safety settings, and turns the
//! classified [`ProviderReply`] into reply text. Extraction rules, first match
//! wins:
//!
//! 1. content segments, concatenated in order
//! 2. a single aggregate text field
//! 3. a safety block, reported to the user with its reason
//! 4. `candidates[0].content.parts[0].text` read from the raw response,
//!    else a fixed apology
//!
//! Blocks and unrecognized shapes are not errors: they still produce a reply.
//! Only a failed provider call returns `Err`.

use chatrelay_types::chat::ChatTurn;
use chatrelay_types::config::RelayConfig;
use chatrelay_types::llm::{
    HarmBlockThreshold, LlmError, ProviderReply, SafetySetting, SessionRequest,
};
use serde_json::Value;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::llm::box_provider::BoxChatProvider;

use super::history::HistoryPolicy;
use super::replies;

/// How the reply text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The provider generated text.
    Generated,
    /// The provider's safety filter refused the prompt.
    Blocked,
    /// No text could be extracted; the reply is a fixed apology.
    Fallback,
}

/// Reply text plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    pub text: String,
    pub outcome: ReplyOutcome,
}

impl RelayReply {
    fn generated(text: String) -> Self {
        Self {
            text,
            outcome: ReplyOutcome::Generated,
        }
    }
}

/// Forwards chat messages to a provider and extracts the reply.
///
/// Holds no per-request state; share one instance behind an `Arc`.
pub struct RelayService {
    provider: BoxChatProvider,
    history_policy: HistoryPolicy,
    safety_settings: Vec<SafetySetting>,
}

impl RelayService {
    pub fn new(
        provider: BoxChatProvider,
        history_policy: HistoryPolicy,
        safety_settings: Vec<SafetySetting>,
    ) -> Self {
        Self {
            provider,
            history_policy,
            safety_settings,
        }
    }

    /// Build a service using the history policy from `config`.
    ///
    /// Every harm category is blocked at medium probability and above.
    pub fn from_config(provider: BoxChatProvider, config: &RelayConfig) -> Self {
        Self::new(
            provider,
            HistoryPolicy::from_config(config),
            SafetySetting::for_all_categories(HarmBlockThreshold::BlockMediumAndAbove),
        )
    }

    /// The underlying provider.
    pub fn provider(&self) -> &BoxChatProvider {
        &self.provider
    }

    /// Relay `message` with the trailing window of `history`.
    ///
    /// Makes exactly one provider call. Returns `Err` only when that call fails.
    pub async fn relay(&self, message: &str, history: &[ChatTurn]) -> Result<RelayReply, LlmError> {
        let request = SessionRequest {
            history: self.history_policy.normalize(history),
            message: message.to_string(),
            safety_settings: self.safety_settings.clone(),
        };
        debug!(history = ?request.history, "Conversation history sent to provider");

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %self.provider.model(),
            gen_ai.request.history_len = request.history.len(),
        );

        let reply = self.provider.send_message(&request).instrument(span).await?;
        info!(kind = reply.kind(), "Received response from provider");

        Ok(extract_reply(reply))
    }
}

/// Apply the extraction rules to a classified provider reply.
pub fn extract_reply(reply: ProviderReply) -> RelayReply {
    match reply {
        ProviderReply::TextSegments(segments) => RelayReply::generated(segments.concat()),
        ProviderReply::AggregateText(text) => RelayReply::generated(text),
        ProviderReply::Blocked { reason, message } => {
            let detail = message
                .as_deref()
                .or(reason.as_deref())
                .unwrap_or("unspecified");
            warn!(
                reason = reason.as_deref().unwrap_or("unspecified"),
                message = %detail,
                "Provider blocked the prompt"
            );
            RelayReply {
                text: replies::blocked(detail),
                outcome: ReplyOutcome::Blocked,
            }
        }
        ProviderReply::Unrecognized { raw } => match first_candidate_text(&raw) {
            Some(text) => RelayReply::generated(text),
            None => {
                error!(raw = %raw, "Unexpected response structure from provider or no text");
                RelayReply {
                    text: replies::NO_RESPONSE.to_string(),
                    outcome: ReplyOutcome::Fallback,
                }
            }
        },
    }
}

fn first_candidate_text(raw: &Value) -> Option<String> {
    raw.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_owned)
}
