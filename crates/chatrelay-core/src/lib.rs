//! Relay logic and provider trait definitions for chatrelay.
//!
//! This crate defines the `ChatProvider` port that the infrastructure layer
//! implements, plus the provider-agnostic relay logic: history windowing and
//! relabeling, and the reply extraction policy. It depends only on
//! `chatrelay-types` -- never on `chatrelay-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
