//! Relay configuration loader.
//!
//! Reads `chatrelay.toml` (path chosen on the command line) and deserializes
//! it into [`RelayConfig`]. Falls back to sensible defaults when the file is
//! missing or malformed.

use std::path::Path;

use chatrelay_types::config::RelayConfig;

/// Smallest history window honored (the window always keeps the last turn).
const MIN_HISTORY_WINDOW: usize = 1;

/// Smallest outbound timeout honored, in seconds.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Load relay configuration from `path`.
///
/// - If the file does not exist, returns [`RelayConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config with floors applied.
pub async fn load_relay_config(path: &Path) -> RelayConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => apply_floors(config),
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            RelayConfig::default()
        }
    }
}

/// Clamp numeric settings to their minimums.
pub fn apply_floors(mut config: RelayConfig) -> RelayConfig {
    config.history_window = config.history_window.max(MIN_HISTORY_WINDOW);
    config.request_timeout_secs = config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS);
    config
}
