//! Gemini `generateContent` API types.
//!
//! These are Gemini-specific request/response structures used for HTTP
//! communication with the generative-language API. They are NOT the generic
//! types from chatrelay-types -- those are provider-agnostic.
//!
//! Response structs are permissive (every field defaulted) so that any
//! reasonably shaped reply deserializes; [`classify_response`] then decides
//! which [`ProviderReply`] variant it is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use chatrelay_types::llm::{NormalizedTurn, ProviderReply, Role, SafetySetting, SessionRequest};

/// Request body for `POST /v1beta/models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<NormalizedTurn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// Seed the conversation with the session history, then append the new
    /// user message as the final turn.
    pub fn from_session(request: &SessionRequest) -> Self {
        let mut contents = Vec::with_capacity(request.history.len() + 1);
        contents.extend(request.history.iter().cloned());
        contents.push(NormalizedTurn::new(Role::User, request.message.clone()));

        Self {
            contents,
            safety_settings: request.safety_settings.clone(),
        }
    }
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Flattened text field added by some gateways in front of the API.
    #[serde(default)]
    pub text: Option<String>,
}

/// One generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A content part. Non-text parts (function calls, inline data) leave `text` empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Feedback on the prompt, present when the prompt itself was blocked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub block_reason_message: Option<String>,
}

/// Candidate finish reasons that mean the output was withheld by a filter.
const FILTERED_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

/// Classify a raw `generateContent` response.
///
/// 1. Text parts of the first candidate -> [`ProviderReply::TextSegments`]
/// 2. A top-level `text` string -> [`ProviderReply::AggregateText`]
/// 3. `promptFeedback.blockReason`, or a first candidate that finished on a
///    safety filter without text -> [`ProviderReply::Blocked`]
/// 4. Anything else, including bodies that do not fit the typed shape ->
///    [`ProviderReply::Unrecognized`] carrying the raw JSON
pub fn classify_response(raw: Value) -> ProviderReply {
    let Ok(parsed) = serde_json::from_value::<GenerateContentResponse>(raw.clone()) else {
        return ProviderReply::Unrecognized { raw };
    };

    let first = parsed.candidates.first();

    let segments: Vec<String> = first
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.clone())
                .collect()
        })
        .unwrap_or_default();
    if !segments.is_empty() {
        return ProviderReply::TextSegments(segments);
    }

    if let Some(text) = parsed.text.filter(|t| !t.is_empty()) {
        return ProviderReply::AggregateText(text);
    }

    if let Some(feedback) = parsed.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            return ProviderReply::Blocked {
                reason: Some(reason),
                message: feedback.block_reason_message,
            };
        }
    }

    if let Some(reason) = first.and_then(|c| c.finish_reason.as_deref()) {
        if FILTERED_FINISH_REASONS.contains(&reason) {
            return ProviderReply::Blocked {
                reason: Some(reason.to_string()),
                message: None,
            };
        }
    }

    ProviderReply::Unrecognized { raw }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::llm::HarmBlockThreshold;
    use serde_json::json;

    #[test]
    fn test_request_appends_message_after_history() {
        let session = SessionRequest {
            history: vec![
                NormalizedTurn::new(Role::User, "hi"),
                NormalizedTurn::new(Role::Model, "hello"),
            ],
            message: "any phones under $300?".to_string(),
            safety_settings: SafetySetting::for_all_categories(
                HarmBlockThreshold::BlockMediumAndAbove,
            ),
        };

        let body = serde_json::to_value(GenerateContentRequest::from_session(&session)).unwrap();
        assert_eq!(
            body["contents"],
            json!([
                {"role": "user", "parts": [{"text": "hi"}]},
                {"role": "model", "parts": [{"text": "hello"}]},
                {"role": "user", "parts": [{"text": "any phones under $300?"}]},
            ])
        );
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            body["safetySettings"][1],
            json!({"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE"})
        );
    }

    #[test]
    fn test_request_without_safety_settings_omits_field() {
        let session = SessionRequest {
            history: Vec::new(),
            message: "hi".to_string(),
            safety_settings: Vec::new(),
        };
        let body = serde_json::to_value(GenerateContentRequest::from_session(&session)).unwrap();
        assert!(body.get("safetySettings").is_none());
    }

    #[test]
    fn test_classify_text_parts() {
        let raw = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello"}, {"text": " there"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3}
        });
        assert_eq!(
            classify_response(raw),
            ProviderReply::TextSegments(vec!["Hello".to_string(), " there".to_string()])
        );
    }

    #[test]
    fn test_classify_skips_non_text_parts() {
        let raw = json!({
            "candidates": [{
                "content": {"parts": [{"functionCall": {"name": "f"}}, {"text": "done"}]}
            }]
        });
        assert_eq!(
            classify_response(raw),
            ProviderReply::TextSegments(vec!["done".to_string()])
        );
    }

    #[test]
    fn test_classify_aggregate_text() {
        let raw = json!({"text": "flattened answer"});
        assert_eq!(
            classify_response(raw),
            ProviderReply::AggregateText("flattened answer".to_string())
        );
    }

    #[test]
    fn test_classify_prompt_block() {
        let raw = json!({
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [{"category": "HARM_CATEGORY_HATE_SPEECH", "probability": "HIGH"}]
            }
        });
        assert_eq!(
            classify_response(raw),
            ProviderReply::Blocked {
                reason: Some("SAFETY".to_string()),
                message: None,
            }
        );
    }

    #[test]
    fn test_classify_prompt_block_with_message() {
        let raw = json!({
            "promptFeedback": {"blockReason": "OTHER", "blockReasonMessage": "Prompt not allowed"}
        });
        assert_eq!(
            classify_response(raw),
            ProviderReply::Blocked {
                reason: Some("OTHER".to_string()),
                message: Some("Prompt not allowed".to_string()),
            }
        );
    }

    #[test]
    fn test_classify_candidate_safety_finish() {
        let raw = json!({"candidates": [{"finishReason": "SAFETY", "index": 0}]});
        assert_eq!(
            classify_response(raw),
            ProviderReply::Blocked {
                reason: Some("SAFETY".to_string()),
                message: None,
            }
        );
    }

    #[test]
    fn test_classify_empty_candidate_is_unrecognized() {
        let raw = json!({"candidates": [{"finishReason": "MAX_TOKENS"}]});
        assert!(matches!(
            classify_response(raw),
            ProviderReply::Unrecognized { .. }
        ));
    }

    #[test]
    fn test_classify_malformed_shape_keeps_raw() {
        let raw = json!({"candidates": "oops"});
        assert_eq!(
            classify_response(raw.clone()),
            ProviderReply::Unrecognized { raw }
        );
    }
}
