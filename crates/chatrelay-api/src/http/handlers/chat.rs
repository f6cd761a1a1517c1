//! Chat relay handler.
//!
//! Endpoint:
//! - POST /api/chat - Relay one user message (plus prior turns) to the model

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;

use chatrelay_types::chat::{ChatRequest, ReplyText};

use crate::http::error::AppError;
use crate::state::AppState;

const INVALID_BODY: &str = "Request body must be a JSON object";
const INVALID_FIELDS: &str =
    "Invalid request body: 'message' must be a string and 'history' a list";
const MISSING_MESSAGE: &str = "No message supplied ('message' field is missing)";

/// POST /api/chat
///
/// Body: `{"message": string, "history"?: [{"content", "sender"}]}`.
/// Replies with `[{"text": string}]`.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<ReplyText>>, AppError> {
    let relay = match state.relay() {
        Ok(relay) => relay,
        Err(reason) => {
            tracing::error!(%reason, "Chat request rejected: AI service is not configured");
            return Err(AppError::ServiceUnavailable);
        }
    };

    let request = parse_request(&body)?;
    let message = match request.message.as_deref() {
        Some(message) if !message.is_empty() => message,
        _ => return Err(AppError::BadRequest(MISSING_MESSAGE.to_string())),
    };

    tracing::info!(
        message = %message,
        history_len = request.history().len(),
        "Received chat message"
    );

    match relay.relay(message, request.history()).await {
        Ok(reply) => {
            tracing::info!(outcome = ?reply.outcome, reply = %reply.text, "Replying to client");
            Ok(Json(ReplyText::body(reply.text)))
        }
        Err(e) => {
            tracing::error!(error = %e, details = ?e, "Chat relay failed");
            Err(AppError::Internal)
        }
    }
}

/// Decode the body into a [`ChatRequest`].
///
/// Anything other than a non-empty JSON object is a bad request, and so is an
/// object whose `message` or `history` has the wrong type.
fn parse_request(body: &[u8]) -> Result<ChatRequest, AppError> {
    let invalid = || AppError::BadRequest(INVALID_BODY.to_string());

    let value: Value = serde_json::from_slice(body).map_err(|_| invalid())?;
    match &value {
        Value::Object(fields) if !fields.is_empty() => {}
        _ => return Err(invalid()),
    }
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "Chat request fields have the wrong type");
        AppError::BadRequest(INVALID_FIELDS.to_string())
    })
}
