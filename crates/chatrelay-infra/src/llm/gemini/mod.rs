//! Google Gemini provider implementation.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`ChatProvider`](chatrelay_core::llm::provider::ChatProvider) trait for
//! the generative-language `generateContent` API, and the response
//! classifier that maps raw replies onto
//! [`ProviderReply`](chatrelay_types::llm::ProviderReply).

pub mod client;
pub mod types;

pub use client::GeminiProvider;
