//! Privacy-preserving activity log.
//!
//! This module tracks and exposes statistics about monitoring activity
//! without storing any audio or identifying information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Activity statistics for the current session.
#[derive(Debug)]
pub struct ActivityLog {
    /// Number of signal samples processed
    samples_seen: AtomicU64,
    /// Number of samples rejected as invalid
    samples_dropped: AtomicU64,
    /// Number of alerts fired by the detector
    detector_alerts: AtomicU64,
    /// Number of alerts raised manually
    manual_alerts: AtomicU64,
    /// Number of alerts resolved
    alerts_resolved: AtomicU64,
    /// Number of chat messages answered
    chat_messages: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
}

impl ActivityLog {
    /// Create a new activity log.
    pub fn new() -> Self {
        Self {
            samples_seen: AtomicU64::new(0),
            samples_dropped: AtomicU64::new(0),
            detector_alerts: AtomicU64::new(0),
            manual_alerts: AtomicU64::new(0),
            alerts_resolved: AtomicU64::new(0),
            chat_messages: AtomicU64::new(0),
            session_start: Utc::now(),
        }
    }

    /// Record a processed sample.
    pub fn record_sample(&self) {
        self.samples_seen.fetch_add(1, Ordering::Relaxed);
    }

    /// Record multiple processed samples.
    pub fn record_samples(&self, count: u64) {
        self.samples_seen.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a sample rejected before processing.
    pub fn record_sample_dropped(&self) {
        self.samples_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an alert fired by the detector.
    pub fn record_detector_alert(&self) {
        self.detector_alerts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a manually triggered alert.
    pub fn record_manual_alert(&self) {
        self.manual_alerts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a resolved alert.
    pub fn record_alert_resolved(&self) {
        self.alerts_resolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an answered chat message.
    pub fn record_chat_message(&self) {
        self.chat_messages.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            samples_seen: self.samples_seen.load(Ordering::Relaxed),
            samples_dropped: self.samples_dropped.load(Ordering::Relaxed),
            detector_alerts: self.detector_alerts.load(Ordering::Relaxed),
            manual_alerts: self.manual_alerts.load(Ordering::Relaxed),
            alerts_resolved: self.alerts_resolved.load(Ordering::Relaxed),
            chat_messages: self.chat_messages.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds() as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Samples processed: {}\n\
             - Samples dropped: {}\n\
             - Detector alerts: {}\n\
             - Manual alerts: {}\n\
             - Alerts resolved: {}\n\
             - Chat messages answered: {}\n\
             - Session duration: {} seconds\n\
             \n\
             Privacy Guarantee:\n\
             - No audio recorded or stored\n\
             - Only derived loudness levels processed",
            stats.samples_seen,
            stats.samples_dropped,
            stats.detector_alerts,
            stats.manual_alerts,
            stats.alerts_resolved,
            stats.chat_messages,
            stats.session_duration_secs
        )
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.samples_seen.store(0, Ordering::Relaxed);
        self.samples_dropped.store(0, Ordering::Relaxed);
        self.detector_alerts.store(0, Ordering::Relaxed);
        self.manual_alerts.store(0, Ordering::Relaxed);
        self.alerts_resolved.store(0, Ordering::Relaxed);
        self.chat_messages.store(0, Ordering::Relaxed);
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of activity statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub samples_seen: u64,
    pub samples_dropped: u64,
    pub detector_alerts: u64,
    pub manual_alerts: u64,
    pub alerts_resolved: u64,
    pub chat_messages: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Thread-safe shared activity log.
pub type SharedActivityLog = Arc<ActivityLog>;

/// Create a new shared activity log.
pub fn create_shared_log() -> SharedActivityLog {
    Arc::new(ActivityLog::new())
}
