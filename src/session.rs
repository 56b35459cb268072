//! Monitoring session aggregate.
//!
//! `MonitoringSession` owns the alert store, the detector, and the assistant,
//! and is the single writer for all of them. A shell holds one session,
//! pushes samples and commands in, and pulls derived views (risk, trend,
//! alert lists) out. Aggregations take an explicit `now` so queries are
//! deterministic under test.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::assistant::Assistant;
use crate::config::Config;
use crate::core::{
    compute_risk, compute_trend_in, AlertEvent, AlertId, AlertStore, AnomalyDetector, AnomalyKind,
    TrendBin,
};
use crate::sampler::SignalSample;
use crate::telemetry::{create_shared_log, SharedActivityLog};

/// One care-monitoring session.
pub struct MonitoringSession {
    store: AlertStore,
    detector: AnomalyDetector,
    assistant: Assistant,
    activity: SharedActivityLog,
    display_tz: Tz,
    monitoring: bool,
    latest_level: Option<f64>,
}

impl MonitoringSession {
    /// Session with entropy-seeded detector randomness.
    pub fn new(config: &Config) -> Self {
        Self::build(config, AnomalyDetector::new(config.detector))
    }

    /// Session with a fixed detector seed, for reproducible runs.
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        Self::build(config, AnomalyDetector::with_seed(config.detector, seed))
    }

    fn build(config: &Config, detector: AnomalyDetector) -> Self {
        Self {
            store: AlertStore::new(),
            detector,
            assistant: Assistant::new(config.reply_delay),
            activity: create_shared_log(),
            display_tz: config.display_tz(),
            monitoring: false,
            latest_level: None,
        }
    }

    /// Enable anomaly detection on incoming samples.
    pub fn start_monitoring(&mut self) {
        self.monitoring = true;
    }

    /// Disable anomaly detection. Samples are still metered.
    pub fn stop_monitoring(&mut self) {
        self.monitoring = false;
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Feed one validated sample through the detector.
    ///
    /// Returns the alert record when the sample fires, so a shell can react
    /// without re-reading the store. The latest level is tracked either way.
    pub fn feed_sample(&mut self, sample: SignalSample) -> Option<AlertEvent> {
        self.activity.record_sample();
        self.latest_level = Some(sample.level);

        let kind = self.detector.evaluate(&sample, self.monitoring)?;
        let event = self.store.insert_at(kind, sample.captured_at);
        self.activity.record_detector_alert();
        Some(event)
    }

    /// Feed a raw loudness level, validating it first.
    ///
    /// Out-of-range or non-finite levels are dropped and counted, never
    /// propagated into the store.
    pub fn feed_level(&mut self, level: f64) -> Option<AlertEvent> {
        match SignalSample::now(level) {
            Ok(sample) => self.feed_sample(sample),
            Err(_) => {
                self.activity.record_sample_dropped();
                None
            }
        }
    }

    /// Raise an alert directly, bypassing the detector.
    ///
    /// Works whether or not monitoring is enabled.
    pub fn trigger_manual(&mut self, kind: AnomalyKind) -> AlertEvent {
        let event = self.store.insert(kind);
        self.activity.record_manual_alert();
        event
    }

    /// Mark an alert resolved.
    ///
    /// Returns whether the id names a known alert. Resolution never reverts,
    /// and re-resolving is a counted-once no-op.
    pub fn resolve_alert(&mut self, id: AlertId) -> bool {
        let already_resolved = match self.store.get(id) {
            None => return false,
            Some(event) => event.resolved,
        };
        if !already_resolved {
            self.store.resolve(id);
            self.activity.record_alert_resolved();
        }
        true
    }

    /// Risk score at `now` over the current alert history.
    pub fn risk_score(&self, now: DateTime<Utc>) -> u8 {
        compute_risk(self.store.all(), now)
    }

    /// Hourly trend at `now`, labeled in the configured display timezone.
    pub fn trend(&self, now: DateTime<Utc>) -> Vec<TrendBin> {
        compute_trend_in(self.store.all(), now, self.display_tz)
    }

    /// Answer a chat message through the assistant.
    pub async fn send_chat_message(&mut self, text: &str) -> String {
        self.activity.record_chat_message();
        self.assistant.reply_delayed(text).await
    }

    /// Every alert ever recorded, newest first.
    pub fn alerts(&self) -> &[AlertEvent] {
        self.store.all()
    }

    /// Unresolved alerts, newest first.
    pub fn active_alerts(&self) -> Vec<&AlertEvent> {
        self.store.active().collect()
    }

    /// Loudness of the most recently fed sample.
    pub fn latest_level(&self) -> Option<f64> {
        self.latest_level
    }

    /// Shared handle to the session activity counters.
    pub fn activity(&self) -> SharedActivityLog {
        SharedActivityLog::clone(&self.activity)
    }
}

impl std::fmt::Debug for MonitoringSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitoringSession")
            .field("monitoring", &self.monitoring)
            .field("alerts", &self.store.len())
            .field("latest_level", &self.latest_level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(fire_probability: f64) -> Config {
        let mut config = Config::default();
        config.detector.fire_probability = fire_probability;
        config.reply_delay = Duration::ZERO;
        config
    }

    #[test]
    fn test_monitoring_flag_lifecycle() {
        let mut session = MonitoringSession::with_seed(&config(1.0), 1);
        assert!(!session.is_monitoring());
        session.start_monitoring();
        assert!(session.is_monitoring());
        session.stop_monitoring();
        assert!(!session.is_monitoring());
    }

    #[test]
    fn test_loud_sample_fires_while_monitoring() {
        let mut session = MonitoringSession::with_seed(&config(1.0), 1);
        session.start_monitoring();

        let event = session.feed_level(0.9).unwrap();
        assert_eq!(event.kind, AnomalyKind::Breathing);
        assert_eq!(session.alerts().len(), 1);
        assert_eq!(session.activity().stats().detector_alerts, 1);
    }

    #[test]
    fn test_no_alerts_while_stopped() {
        let mut session = MonitoringSession::with_seed(&config(1.0), 1);
        assert!(session.feed_level(0.9).is_none());
        assert!(session.alerts().is_empty());
        // The level is still metered.
        assert_eq!(session.latest_level(), Some(0.9));
    }

    #[test]
    fn test_quiet_samples_never_fire() {
        let mut session = MonitoringSession::with_seed(&config(1.0), 1);
        session.start_monitoring();
        assert!(session.feed_level(0.2).is_none());
        assert!(session.feed_level(0.5).is_none());
        assert!(session.alerts().is_empty());
    }

    #[test]
    fn test_invalid_level_dropped_and_counted() {
        let mut session = MonitoringSession::with_seed(&config(1.0), 1);
        session.start_monitoring();

        assert!(session.feed_level(1.7).is_none());
        assert!(session.feed_level(f64::NAN).is_none());

        let stats = session.activity().stats();
        assert_eq!(stats.samples_dropped, 2);
        assert_eq!(stats.samples_seen, 0);
        assert_eq!(session.latest_level(), None);
    }

    #[test]
    fn test_manual_trigger_bypasses_detector() {
        let mut session = MonitoringSession::with_seed(&config(0.0), 1);
        // Monitoring off and probability zero; manual still inserts.
        let event = session.trigger_manual(AnomalyKind::Fall);
        assert_eq!(event.kind, AnomalyKind::Fall);
        assert_eq!(event.label, "Possible fall detected");
        assert!(!event.resolved);
        assert_eq!(session.active_alerts().len(), 1);
        assert_eq!(session.activity().stats().manual_alerts, 1);
    }

    #[test]
    fn test_resolve_lowers_risk_and_counts_once() {
        let mut session = MonitoringSession::with_seed(&config(0.0), 1);
        let event = session.trigger_manual(AnomalyKind::Fall);
        let now = Utc::now();
        assert_eq!(session.risk_score(now), 40);

        assert!(session.resolve_alert(event.id));
        assert_eq!(session.risk_score(now), 0);
        assert!(session.active_alerts().is_empty());

        // Idempotent re-resolve still succeeds but is not recounted.
        assert!(session.resolve_alert(event.id));
        assert_eq!(session.activity().stats().alerts_resolved, 1);

        assert!(!session.resolve_alert(AlertId::new()));
    }

    #[test]
    fn test_trend_reflects_manual_alerts() {
        let mut session = MonitoringSession::with_seed(&config(0.0), 1);
        let first = session.trigger_manual(AnomalyKind::Speech);
        session.trigger_manual(AnomalyKind::Breathing);

        let bins = session.trend(Utc::now());
        assert_eq!(bins.len(), 12);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u32>(), 2);

        // The hour can roll over between insert and query; find the bin by
        // label rather than position.
        let label = first.timestamp.format("%H:00").to_string();
        assert!(bins.iter().any(|b| b.label == label && b.count >= 1));
    }

    #[tokio::test]
    async fn test_chat_answers_and_counts() {
        let mut session = MonitoringSession::with_seed(&config(0.0), 1);
        let reply = session.send_chat_message("I think she had a fall").await;
        assert_eq!(reply, AnomalyKind::Fall.advisory());
        assert_eq!(session.activity().stats().chat_messages, 1);
    }
}
