//! LLM provider abstractions for chatrelay.
//!
//! - `ChatProvider`: RPITIT trait for concrete provider implementations
//! - `BoxChatProvider`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
