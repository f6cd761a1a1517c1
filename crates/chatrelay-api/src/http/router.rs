//! Axum router configuration with middleware.
//!
//! Routes: `POST /api/chat`.
//! Middleware: CORS (any origin), tracing, panic recovery.

use std::any::Any;

use axum::Router;
use axum::response::Response;
use axum::routing::post;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use chatrelay_core::chat::replies;

use crate::http::error::failure;
use crate::http::handlers;
use crate::state::AppState;

/// Build the relay router with all middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Unhandled failure while processing chat request");
    failure(replies::SYSTEM_FAILURE)
}
