//! Shared domain types for chatrelay.
//!
//! This crate contains the types passed between the HTTP layer, the relay
//! service, and the provider adapters: caller-facing chat turns, the
//! provider-facing normalized conversation, safety settings, the tagged
//! provider reply, and the relay configuration.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod chat;
pub mod config;
pub mod llm;
