//! ChatProvider trait definition.
//!
//! This is the core abstraction that all generative-conversation providers
//! implement. Uses RPITIT for `send_message`.

use chatrelay_types::llm::{LlmError, ProviderReply, SessionRequest};

/// Trait for generative-conversation backends (Gemini, test doubles, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Wrap an
/// implementation in `BoxChatProvider` when it must be chosen at runtime.
///
/// Implementations live in chatrelay-infra (e.g., `GeminiProvider`).
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Open a session seeded with `request.history` and send
    /// `request.message` under `request.safety_settings`.
    ///
    /// A successful call always yields a classified [`ProviderReply`];
    /// blocked prompts and unfamiliar response shapes are replies, not errors.
    fn send_message(
        &self,
        request: &SessionRequest,
    ) -> impl std::future::Future<Output = Result<ProviderReply, LlmError>> + Send;
}
