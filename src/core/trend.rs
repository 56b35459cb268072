//! Hourly event-frequency trend over a trailing window.
//!
//! Events are bucketed by truncating their timestamp to the hour and mapping
//! that hour onto a fixed range of bin boundaries. Bucketing happens on the
//! UTC timeline; the display timezone only affects labels, never which bin
//! an event lands in.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::types::AlertEvent;

/// Number of hourly bins in a trend.
pub const TREND_BINS: usize = 12;

const SECS_PER_HOUR: i64 = 3600;

/// One hour of the trend histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBin {
    /// Start of the hour, formatted `%H:%M` in the display timezone
    pub label: String,
    /// Events whose timestamp falls inside this hour
    pub count: u32,
}

/// Trend over the trailing 12 hours, labeled in UTC.
pub fn compute_trend(events: &[AlertEvent], now: DateTime<Utc>) -> Vec<TrendBin> {
    compute_trend_in(events, now, chrono_tz::UTC)
}

/// Trend over the trailing 12 hours, labeled in `tz`.
///
/// Returns exactly [`TREND_BINS`] bins, oldest first; the last bin is the
/// hour containing `now`. Resolution status is ignored, and events outside
/// the covered hours (older than the first bin, or timestamped past `now`'s
/// hour) are dropped.
pub fn compute_trend_in(events: &[AlertEvent], now: DateTime<Utc>, tz: Tz) -> Vec<TrendBin> {
    let newest_hour = trunc_hour(now);
    let oldest_hour = newest_hour - (TREND_BINS as i64 - 1);

    let mut counts = [0u32; TREND_BINS];
    for event in events {
        let offset = trunc_hour(event.timestamp) - oldest_hour;
        if (0..TREND_BINS as i64).contains(&offset) {
            counts[offset as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| TrendBin {
            label: hour_label(oldest_hour + i as i64, tz),
            count,
        })
        .collect()
}

/// Hours since the epoch, floored.
fn trunc_hour(ts: DateTime<Utc>) -> i64 {
    ts.timestamp().div_euclid(SECS_PER_HOUR)
}

fn hour_label(hour: i64, tz: Tz) -> String {
    match DateTime::<Utc>::from_timestamp(hour * SECS_PER_HOUR, 0) {
        Some(start) => start.with_timezone(&tz).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
