//! Observability setup for chatrelay.
//!
//! Structured logging via `tracing-subscriber`, with optional OpenTelemetry
//! span export.

pub mod tracing_setup;
