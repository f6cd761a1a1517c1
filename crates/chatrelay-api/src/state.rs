//! Application state shared by the HTTP handlers.
//!
//! The provider is constructed once at startup. When the credential is
//! missing or the provider cannot be built, the server still starts and
//! remembers why; every chat request then fails fast with a configuration
//! error instead of reaching the network.

use std::sync::Arc;

use chatrelay_core::chat::service::RelayService;
use chatrelay_infra::llm::create_provider;
use chatrelay_infra::secret::env::EnvCredentialSource;
use chatrelay_types::config::RelayConfig;

/// Why the relay is unable to serve chat requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DegradedReason {
    #[error("{0} not found; the AI service will not work")]
    MissingCredential(String),

    #[error("failed to initialize the AI model: {0}")]
    InitializationFailed(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    relay: Result<Arc<RelayService>, DegradedReason>,
}

impl AppState {
    /// Resolve the credential and build the relay service.
    ///
    /// Never fails: startup problems are logged and kept as a
    /// [`DegradedReason`].
    pub fn init(config: &RelayConfig) -> Self {
        Self::init_with(config, &EnvCredentialSource::default())
    }

    /// Like [`AppState::init`], reading the credential from `source`.
    pub fn init_with(config: &RelayConfig, source: &EnvCredentialSource) -> Self {
        let Some(api_key) = source.resolve() else {
            let reason = DegradedReason::MissingCredential(source.var_name().to_string());
            tracing::error!("{reason}");
            return Self::degraded(reason);
        };

        match create_provider(config, api_key) {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.name(),
                    model = provider.model(),
                    "AI model initialized"
                );
                Self::ready(RelayService::from_config(provider, config))
            }
            Err(e) => {
                let reason = DegradedReason::InitializationFailed(e.to_string());
                tracing::error!("{reason}");
                Self::degraded(reason)
            }
        }
    }

    /// State backed by a working relay service.
    pub fn ready(service: RelayService) -> Self {
        Self {
            relay: Ok(Arc::new(service)),
        }
    }

    /// State that rejects every chat request.
    pub fn degraded(reason: DegradedReason) -> Self {
        Self { relay: Err(reason) }
    }

    /// The relay service, or the reason it is unavailable.
    pub fn relay(&self) -> Result<&RelayService, &DegradedReason> {
        self.relay.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_without_credential_is_degraded() {
        let source = EnvCredentialSource::new("CHATRELAY_TEST_STATE_KEY_UNSET_XYZ");
        let state = AppState::init_with(&RelayConfig::default(), &source);
        assert_eq!(
            state.relay().err(),
            Some(&DegradedReason::MissingCredential(
                "CHATRELAY_TEST_STATE_KEY_UNSET_XYZ".to_string()
            ))
        );
    }

    #[test]
    fn init_with_bad_config_is_degraded() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("CHATRELAY_TEST_STATE_KEY_BADCFG", "k") };

        let config = RelayConfig {
            model: "bad model".to_string(),
            ..RelayConfig::default()
        };
        let source = EnvCredentialSource::new("CHATRELAY_TEST_STATE_KEY_BADCFG");
        let state = AppState::init_with(&config, &source);
        assert!(matches!(
            state.relay(),
            Err(DegradedReason::InitializationFailed(_))
        ));

        // SAFETY: the variable was set above and is unique to this test.
        unsafe { std::env::remove_var("CHATRELAY_TEST_STATE_KEY_BADCFG") };
    }

    #[test]
    fn init_with_credential_is_ready() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("CHATRELAY_TEST_STATE_KEY_OK", "k") };

        let source = EnvCredentialSource::new("CHATRELAY_TEST_STATE_KEY_OK");
        let state = AppState::init_with(&RelayConfig::default(), &source);
        let relay = state.relay().ok().unwrap();
        assert_eq!(relay.provider().model(), "gemini-1.5-flash-latest");

        // SAFETY: the variable was set above and is unique to this test.
        unsafe { std::env::remove_var("CHATRELAY_TEST_STATE_KEY_OK") };
    }
}
