//! User-facing reply texts.

/// Sent when the provider could not be configured at startup.
pub const SERVICE_UNAVAILABLE: &str =
    "Server error: the AI service is not available (configuration error).";

/// Sent when the provider call fails or the handler hits an unexpected error.
pub const SYSTEM_FAILURE: &str =
    "Sorry, I am experiencing a system problem and cannot respond right now.";

/// Sent when the provider answered in a shape no extraction rule understands.
pub const NO_RESPONSE: &str = "Sorry, the assistant could not produce a response right now.";

/// Reply for a prompt the provider's safety filter refused.
pub fn blocked(detail: &str) -> String {
    format!("Your request was blocked for safety reasons: {detail}")
}
