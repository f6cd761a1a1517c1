//! BoxChatProvider -- object-safe dynamic dispatch wrapper for ChatProvider.
//!
//! 1. Define an object-safe `ChatProviderDyn` trait with boxed futures
//! 2. Blanket-impl `ChatProviderDyn` for all `T: ChatProvider`
//! 3. `BoxChatProvider` wraps `Box<dyn ChatProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use chatrelay_types::llm::{LlmError, ProviderReply, SessionRequest};

use super::provider::ChatProvider;

/// Object-safe version of [`ChatProvider`] with boxed futures.
///
/// A blanket implementation is provided for all types implementing `ChatProvider`.
pub trait ChatProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn send_message_boxed<'a>(
        &'a self,
        request: &'a SessionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderReply, LlmError>> + Send + 'a>>;
}

impl<T: ChatProvider> ChatProviderDyn for T {
    fn name(&self) -> &str {
        ChatProvider::name(self)
    }

    fn model(&self) -> &str {
        ChatProvider::model(self)
    }

    fn send_message_boxed<'a>(
        &'a self,
        request: &'a SessionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProviderReply, LlmError>> + Send + 'a>> {
        Box::pin(self.send_message(request))
    }
}

/// Type-erased chat provider.
///
/// Lets the HTTP layer hold the provider built at startup without naming its
/// concrete type, and lets tests substitute a scripted double.
pub struct BoxChatProvider {
    inner: Box<dyn ChatProviderDyn + Send + Sync>,
}

impl BoxChatProvider {
    /// Wrap a concrete `ChatProvider` in a type-erased box.
    pub fn new<T: ChatProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Send one message in a session seeded with the request's history.
    pub async fn send_message(&self, request: &SessionRequest) -> Result<ProviderReply, LlmError> {
        self.inner.send_message_boxed(request).await
    }
}
