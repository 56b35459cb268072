//! Windowed risk score over the alert history.
//!
//! Risk is a recomputed view, not stored state: every call walks the event
//! list and derives the score from scratch, so resolving an alert lowers the
//! next reading with no cache to invalidate.

use chrono::{DateTime, Duration, Utc};

use super::types::AlertEvent;

/// How far back an unresolved event keeps contributing.
pub const RISK_WINDOW_HOURS: i64 = 24;

/// Multiplier applied to the summed severity weights.
pub const RISK_SCALE: u32 = 8;

/// Upper clamp of the published score.
pub const RISK_CEILING: u8 = 100;

/// Compute the risk score at `now` from the full event history.
///
/// Unresolved events no older than `now` minus the window count, boundary
/// included. Their severity weights are summed, scaled by [`RISK_SCALE`],
/// and clamped to `0..=100`. An empty or fully resolved history scores 0.
pub fn compute_risk(events: &[AlertEvent], now: DateTime<Utc>) -> u8 {
    let cutoff = now - Duration::hours(RISK_WINDOW_HOURS);
    let total: u32 = events
        .iter()
        .filter(|e| !e.resolved && e.timestamp >= cutoff)
        .map(|e| e.kind.weight())
        .sum();
    total
        .saturating_mul(RISK_SCALE)
        .min(RISK_CEILING as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AnomalyKind;

    fn event_at(kind: AnomalyKind, now: DateTime<Utc>, hours_ago: i64) -> AlertEvent {
        AlertEvent::new(kind, now - Duration::hours(hours_ago))
    }

    #[test]
    fn test_empty_history_scores_zero() {
        assert_eq!(compute_risk(&[], Utc::now()), 0);
    }

    #[test]
    fn test_single_fall_scores_forty() {
        let now = Utc::now();
        let events = vec![event_at(AnomalyKind::Fall, now, 1)];
        assert_eq!(compute_risk(&events, now), 40);
    }

    #[test]
    fn test_one_of_each_scores_ninety_six() {
        let now = Utc::now();
        let events = vec![
            event_at(AnomalyKind::Fall, now, 1),
            event_at(AnomalyKind::Breathing, now, 2),
            event_at(AnomalyKind::Speech, now, 3),
        ];
        // (5 + 3 + 4) * 8
        assert_eq!(compute_risk(&events, now), 96);
    }

    #[test]
    fn test_resolved_events_do_not_count() {
        let now = Utc::now();
        let mut fall = event_at(AnomalyKind::Fall, now, 1);
        fall.resolved = true;
        let events = vec![fall, event_at(AnomalyKind::Breathing, now, 2)];
        assert_eq!(compute_risk(&events, now), 24);
    }

    #[test]
    fn test_stale_events_age_out() {
        let now = Utc::now();
        let events = vec![
            event_at(AnomalyKind::Fall, now, 30),
            event_at(AnomalyKind::Speech, now, 2),
        ];
        assert_eq!(compute_risk(&events, now), 32);
    }

    #[test]
    fn test_event_at_window_boundary_still_counts() {
        let now = Utc::now();
        let events = vec![event_at(AnomalyKind::Fall, now, RISK_WINDOW_HOURS)];
        assert_eq!(compute_risk(&events, now), 40);
    }

    #[test]
    fn test_event_past_window_boundary_scores_zero() {
        let now = Utc::now();
        let ts = now - Duration::hours(RISK_WINDOW_HOURS) - Duration::seconds(1);
        let events = vec![AlertEvent::new(AnomalyKind::Fall, ts)];
        assert_eq!(compute_risk(&events, now), 0);
    }

    #[test]
    fn test_score_clamps_at_ceiling() {
        let now = Utc::now();
        let events: Vec<_> = (0..4).map(|i| event_at(AnomalyKind::Fall, now, i)).collect();
        // 4 falls would score 160 unclamped
        assert_eq!(compute_risk(&events, now), 100);
    }

    #[test]
    fn test_all_resolved_scores_zero() {
        let now = Utc::now();
        let mut events = vec![
            event_at(AnomalyKind::Fall, now, 1),
            event_at(AnomalyKind::Speech, now, 2),
        ];
        for e in &mut events {
            e.resolved = true;
        }
        assert_eq!(compute_risk(&events, now), 0);
    }
}
