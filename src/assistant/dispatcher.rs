//! Keyword-driven care assistant.
//!
//! The assistant is a fixed dispatch table, not a model: each message is
//! scanned for anomaly keywords in priority order and answered with the
//! matching advisory text, or with a generic emergency fallback. Replies are
//! paced by an artificial delay so a shell can present the exchange at a
//! conversational rhythm.

use std::time::Duration;

use crate::core::AnomalyKind;

/// Reply used when no anomaly keyword matches.
pub const FALLBACK_ADVISORY: &str =
    "I am here to help. If this is an emergency, call local emergency services.";

/// Default artificial reply delay.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(400);

/// Map a free-text message to the anomaly topic it asks about.
///
/// Matching is case-insensitive substring search over a priority list, so a
/// message touching several topics answers the most severe one: fall, then
/// breathing, then speech ("slur" also selects speech). Returns `None` when
/// nothing matches.
pub fn detect_topic(text: &str) -> Option<AnomalyKind> {
    let lower = text.to_lowercase();
    if lower.contains("fall") {
        Some(AnomalyKind::Fall)
    } else if lower.contains("breath") {
        Some(AnomalyKind::Breathing)
    } else if lower.contains("speech") || lower.contains("slur") {
        Some(AnomalyKind::Speech)
    } else {
        None
    }
}

/// Stateless advisory responder.
#[derive(Debug, Clone)]
pub struct Assistant {
    reply_delay: Duration,
}

impl Assistant {
    /// Assistant with the given reply delay.
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }

    /// The configured artificial delay.
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Immediate advisory for `text`.
    pub fn reply(&self, text: &str) -> &'static str {
        match detect_topic(text) {
            Some(kind) => kind.advisory(),
            None => FALLBACK_ADVISORY,
        }
    }

    /// Advisory for `text` after the configured delay.
    pub async fn reply_delayed(&self, text: &str) -> String {
        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }
        self.reply(text).to_string()
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}
