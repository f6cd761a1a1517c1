//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`ChatProvider`] trait
//! defined in `chatrelay-core` for Google Gemini, and a factory
//! ([`create_provider`]) that builds it from a [`RelayConfig`].
//!
//! [`ChatProvider`]: chatrelay_core::llm::provider::ChatProvider

pub mod gemini;

use secrecy::SecretString;

use chatrelay_core::llm::box_provider::BoxChatProvider;
use chatrelay_types::config::RelayConfig;
use chatrelay_types::llm::LlmError;

use self::gemini::GeminiProvider;

/// Create a [`BoxChatProvider`] from the relay configuration and a resolved API key.
///
/// # Errors
///
/// Returns [`LlmError::Configuration`] if the provider cannot be initialized
/// from `config`.
pub fn create_provider(config: &RelayConfig, api_key: SecretString) -> Result<BoxChatProvider, LlmError> {
    let provider = GeminiProvider::new(api_key, config)?;
    Ok(BoxChatProvider::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_gemini() {
        let provider = create_provider(&RelayConfig::default(), SecretString::from("k")).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-1.5-flash-latest");
    }

    #[test]
    fn test_create_provider_bad_config() {
        let config = RelayConfig {
            api_base_url: "::nope::".to_string(),
            ..RelayConfig::default()
        };
        match create_provider(&config, SecretString::from("k")) {
            Err(LlmError::Configuration(_)) => {} // expected
            Err(other) => panic!("Expected Configuration error, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
