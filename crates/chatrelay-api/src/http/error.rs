//! Application error type mapping to HTTP status codes and body shapes.
//!
//! Validation failures use an `{"error": ...}` object. Server-side failures
//! use the same `[{"text": ...}]` list shape as a successful reply so the
//! client can render them in the conversation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_core::chat::replies;
use chatrelay_types::chat::ReplyText;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request body or its `message` field is unusable.
    BadRequest(String),
    /// The AI service was not configured at startup.
    ServiceUnavailable,
    /// The provider call failed or something unexpected happened.
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::ServiceUnavailable => failure(replies::SERVICE_UNAVAILABLE),
            AppError::Internal => failure(replies::SYSTEM_FAILURE),
        }
    }
}

/// 500 with the reply-shaped body.
pub fn failure(text: &str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ReplyText::body(text))).into_response()
}
