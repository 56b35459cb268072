//! Signal sample types for the CareSense agent.
//!
//! A sample is a single normalized loudness reading. Samples are validated at
//! construction so the rest of the pipeline never sees a malformed level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized loudness sample in `[0, 1]`.
///
/// Samples are ephemeral: only the alert events derived from them are kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    /// Normalized loudness level, `0.0` (silence) to `1.0` (full scale)
    pub level: f64,
    /// Timestamp when the sample was captured
    pub captured_at: DateTime<Utc>,
}

impl SignalSample {
    /// Create a sample with an explicit capture time.
    ///
    /// Returns [`SampleError`] if the level is not a finite value in `[0, 1]`.
    pub fn new(level: f64, captured_at: DateTime<Utc>) -> Result<Self, SampleError> {
        if !level.is_finite() {
            return Err(SampleError::NotFinite);
        }
        if !(0.0..=1.0).contains(&level) {
            return Err(SampleError::OutOfRange(level));
        }
        Ok(Self { level, captured_at })
    }

    /// Create a sample captured now.
    pub fn now(level: f64) -> Result<Self, SampleError> {
        Self::new(level, Utc::now())
    }
}

/// Errors for malformed signal samples.
///
/// A malformed sample is dropped before classification; it never creates an
/// alert and is never fatal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleError {
    /// Level outside `[0, 1]`
    OutOfRange(f64),
    /// Level is NaN or infinite
    NotFinite,
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::OutOfRange(level) => {
                write!(f, "sample level {level} outside [0, 1]")
            }
            SampleError::NotFinite => write!(f, "sample level is not a finite number"),
        }
    }
}

impl std::error::Error for SampleError {}
