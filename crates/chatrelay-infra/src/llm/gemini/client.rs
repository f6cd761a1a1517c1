//! GeminiProvider -- concrete [`ChatProvider`] implementation for Google Gemini.
//!
//! Sends one `generateContent` request per message: the session history,
//! the new user turn, and the safety settings, authenticated with the
//! `x-goog-api-key` header.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use chatrelay_core::llm::provider::ChatProvider;
use chatrelay_types::config::RelayConfig;
use chatrelay_types::llm::{LlmError, ProviderReply, SessionRequest};

use super::types::{GenerateContentRequest, classify_response};

/// Google Gemini provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// building the request header. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiProvider {
    /// Build a provider for `config.model` at `config.api_base_url`.
    ///
    /// Fails with [`LlmError::Configuration`] when the model name or base URL
    /// is unusable, the timeout is zero, or the HTTP client cannot be built.
    pub fn new(api_key: SecretString, config: &RelayConfig) -> Result<Self, LlmError> {
        let model = config.model.trim();
        if model.is_empty() || model.contains(['/', '?', '#']) || model.contains(char::is_whitespace)
        {
            return Err(LlmError::Configuration(format!(
                "invalid model name: '{}'",
                config.model
            )));
        }

        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            LlmError::Configuration(format!("invalid API base URL '{}': {e}", config.api_base_url))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(LlmError::Configuration(format!(
                "unsupported API base URL scheme: '{}'",
                base_url.scheme()
            )));
        }

        if config.request_timeout_secs == 0 {
            return Err(LlmError::Configuration(
                "request timeout must be at least one second".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {e}")))?;

        let endpoint = format!(
            "{}/v1beta/models/{model}:generateContent",
            base_url.as_str().trim_end_matches('/')
        );

        Ok(Self {
            client,
            api_key,
            endpoint,
            model: model.to_string(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// Full `generateContent` URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else {
            LlmError::Provider {
                message: format!("HTTP request failed: {err}"),
            }
        }
    }
}

// No Debug impl: the struct holds the API key.

impl ChatProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send_message(&self, request: &SessionRequest) -> Result<ProviderReply, LlmError> {
        let body = GenerateContentRequest::from_session(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1000));
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(error_body),
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited { retry_after_ms },
                503 => LlmError::Overloaded(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let raw: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout_secs)
            } else {
                LlmError::Deserialization(format!("failed to parse response: {e}"))
            }
        })?;
        debug!(model = %self.model, "Received generateContent response");

        Ok(classify_response(raw))
    }
}
