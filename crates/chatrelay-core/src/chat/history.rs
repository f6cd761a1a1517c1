//! Conversation history normalization.
//!
//! The caller sends its whole local transcript with every request. Only a
//! trailing window is forwarded, relabeled into provider roles. If the
//! window opens with the front-end's canned welcome message, that turn is
//! dropped so the model does not see its own greeting replayed.

use chatrelay_types::chat::{ChatTurn, Sender};
use chatrelay_types::config::RelayConfig;
use chatrelay_types::llm::NormalizedTurn;
use tracing::info;

/// Window size and welcome-banner rule applied to caller history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPolicy {
    window: usize,
    welcome_banner: String,
}

impl HistoryPolicy {
    /// Create a policy keeping at most `window` trailing turns.
    ///
    /// An empty `welcome_banner` disables the banner rule.
    pub fn new(window: usize, welcome_banner: impl Into<String>) -> Self {
        Self {
            window,
            welcome_banner: welcome_banner.into(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.history_window, config.welcome_banner.clone())
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Build the provider-facing history from caller turns.
    ///
    /// Takes the last `min(window, len)` turns in their original order and
    /// maps each to a [`NormalizedTurn`]. The first turn of that window is
    /// skipped when it is the bot's welcome banner and the window holds more
    /// than one turn. `history` is only read.
    pub fn normalize(&self, history: &[ChatTurn]) -> Vec<NormalizedTurn> {
        let start = history.len().saturating_sub(self.window);
        let recent = &history[start..];

        let skip_banner = recent.len() > 1 && self.is_welcome_banner(&recent[0]);
        if skip_banner {
            info!("Skipping the bot welcome message in history");
        }

        recent
            .iter()
            .skip(usize::from(skip_banner))
            .map(NormalizedTurn::from)
            .collect()
    }

    fn is_welcome_banner(&self, turn: &ChatTurn) -> bool {
        turn.sender == Sender::Bot
            && !self.welcome_banner.is_empty()
            && turn.content.contains(&self.welcome_banner)
    }
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self::from_config(&RelayConfig::default())
    }
}
