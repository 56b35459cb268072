//! Threshold-gated stochastic anomaly detector.
//!
//! The detector inspects one sample at a time and never buffers: a sample
//! either fires an anomaly or leaves no trace. Loud samples cross the
//! threshold gate, then a Bernoulli draw decides whether this particular
//! crossing becomes an alert. The draw keeps sustained loud input from
//! flooding the store while staying cheap enough to run per frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::sampler::SignalSample;

use super::types::AnomalyKind;

/// Loudness a sample must exceed before the detector considers it.
pub const DEFAULT_LOUDNESS_THRESHOLD: f64 = 0.5;

/// Probability that a qualifying sample fires an alert.
pub const DEFAULT_FIRE_PROBABILITY: f64 = 0.02;

/// Tuning knobs for [`AnomalyDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Samples at or below this loudness are ignored
    #[serde(default = "default_threshold")]
    pub loudness_threshold: f64,
    /// Chance that a sample above the threshold fires
    #[serde(default = "default_probability")]
    pub fire_probability: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_LOUDNESS_THRESHOLD
}

fn default_probability() -> f64 {
    DEFAULT_FIRE_PROBABILITY
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            loudness_threshold: DEFAULT_LOUDNESS_THRESHOLD,
            fire_probability: DEFAULT_FIRE_PROBABILITY,
        }
    }
}

/// Per-sample anomaly detector over the audio loudness channel.
pub struct AnomalyDetector {
    settings: DetectorSettings,
    rng: StdRng,
}

impl AnomalyDetector {
    /// Detector with entropy-seeded randomness.
    pub fn new(settings: DetectorSettings) -> Self {
        Self {
            settings,
            rng: StdRng::from_entropy(),
        }
    }

    /// Detector with a fixed seed, for reproducible runs.
    pub fn with_seed(settings: DetectorSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The settings this detector was built with.
    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    /// Evaluate one sample.
    ///
    /// Returns the classified anomaly kind when the sample fires. Samples at
    /// exactly the threshold do not qualify, and nothing fires while
    /// monitoring is off. The gate draw is only taken for qualifying
    /// samples, so disabled stretches leave the rng sequence untouched.
    pub fn evaluate(&mut self, sample: &SignalSample, monitoring: bool) -> Option<AnomalyKind> {
        if !monitoring {
            return None;
        }
        if sample.level <= self.settings.loudness_threshold {
            return None;
        }
        if self.rng.gen::<f64>() < self.settings.fire_probability {
            // Loudness anomalies on the audio channel read as breathing
            // irregularity; falls and speech arrive via manual triggers.
            Some(AnomalyKind::Breathing)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for AnomalyDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnomalyDetector")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
