//! Relay configuration types.
//!
//! `RelayConfig` represents `chatrelay.toml`, which controls the provider
//! model and endpoint, the outbound timeout, and the history policy. The
//! safety filter is not configurable.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the relay.
///
/// Loaded from `chatrelay.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Gemini model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative-language API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upper bound on a single provider call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of trailing history turns forwarded to the provider.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Substring identifying the front-end's welcome message.
    #[serde(default = "default_welcome_banner")]
    pub welcome_banner: String,
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_history_window() -> usize {
    8
}

fn default_welcome_banner() -> String {
    "I am a Tech Shop AI assistant".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            history_window: default_history_window(),
            welcome_banner: default_welcome_banner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_default_values() {
        let config = RelayConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash-latest");
        assert_eq!(config.history_window, 8);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.welcome_banner, "I am a Tech Shop AI assistant");
    }

    #[test]
    fn test_relay_config_partial_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
model = "gemini-2.0-flash"
history_window = 4
"#,
        )
        .unwrap();

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.history_window, 4);
        // Untouched fields keep their defaults
        assert_eq!(config.api_base_url, default_api_base_url());
        assert_eq!(config.welcome_banner, default_welcome_banner());
    }

    #[test]
    fn test_relay_config_empty_toml_is_default() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config, RelayConfig::default());
    }
}
