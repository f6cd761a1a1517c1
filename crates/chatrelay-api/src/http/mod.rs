//! HTTP layer for the chat relay.
//!
//! A single axum route, `POST /api/chat`, with permissive CORS, request
//! tracing and panic recovery.

pub mod error;
pub mod handlers;
pub mod router;
