//! Core functionality for the CareSense agent.
//!
//! This module contains:
//! - Alert event types and the closed anomaly classification
//! - The threshold-gated stochastic detector
//! - The in-memory alert store and its derived views (risk, trend)

pub mod detector;
pub mod risk;
pub mod store;
pub mod trend;
pub mod types;

// Re-export commonly used types
pub use detector::{
    AnomalyDetector, DetectorSettings, DEFAULT_FIRE_PROBABILITY, DEFAULT_LOUDNESS_THRESHOLD,
};
pub use risk::{compute_risk, RISK_CEILING, RISK_SCALE, RISK_WINDOW_HOURS};
pub use store::AlertStore;
pub use trend::{compute_trend, compute_trend_in, TrendBin, TREND_BINS};
pub use types::{AlertEvent, AlertId, AnomalyKind, UnknownKind};
