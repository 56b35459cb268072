//! CareSense Agent - local signal-to-alert pipeline for in-home care.
//!
//! This library turns ambient loudness readings into advisory health alerts,
//! an aggregate risk score, and an hourly event trend, with an assistant for
//! caregiver questions.
//!
//! # Scope
//!
//! - **Advisory only**: alerts and tips support a caregiver, they diagnose
//!   nothing and never contact emergency services
//! - **Levels, not audio**: the pipeline processes normalized loudness
//!   levels; no audio is recorded or stored
//! - **Local**: all state lives in memory for the current session
//! - **Simulated capture**: the built-in source synthesizes waveforms, so
//!   the whole pipeline runs without a microphone
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CareSense Agent                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │   Sampler   │──▶│  Detector   │──▶│ Alert Store │       │
//! │  │ (loudness)  │   │ (threshold) │   │ (lifecycle) │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │         │                                    │             │
//! │         ▼                                    ▼             │
//! │  ┌─────────────┐                     ┌─────────────┐       │
//! │  │  Activity   │                     │ Risk + Trend│       │
//! │  │     Log     │                     │    views    │       │
//! │  └─────────────┘                     └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use caresense_agent::{Config, MonitoringSession};
//!
//! let config = Config::default();
//! let mut session = MonitoringSession::new(&config);
//! session.start_monitoring();
//!
//! // Feed loudness levels from a capture source
//! if let Some(alert) = session.feed_level(0.8) {
//!     println!("alert: {}", alert.label);
//! }
//! ```

pub mod assistant;
pub mod config;
pub mod core;
pub mod sampler;
pub mod session;
pub mod telemetry;

// Re-export key types at crate root for convenience
pub use assistant::{Assistant, FALLBACK_ADVISORY};
pub use config::{CaptureSettings, Config};
pub use core::{
    compute_risk, compute_trend, AlertEvent, AlertId, AlertStore, AnomalyDetector, AnomalyKind,
    DetectorSettings, TrendBin,
};
pub use sampler::{CaptureConfig, CaptureError, SignalSample, SimulatedCapture};
pub use session::MonitoringSession;
pub use telemetry::{ActivityLog, ActivitySnapshot, SharedActivityLog};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Care notice that can be displayed to users.
pub const CARE_NOTICE: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║                 CARESENSE AGENT - CARE NOTICE                    ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  This agent watches ambient loudness for signs of trouble.       ║
║                                                                  ║
║  ✓ WHAT IT DOES:                                                 ║
║    • Meters ambient loudness levels (no audio is stored)         ║
║    • Raises advisory alerts for possible falls, breathing        ║
║      irregularities, and slurred speech                          ║
║    • Tracks a 24-hour risk score and a 12-hour trend             ║
║    • Answers care questions with fixed first-aid guidance        ║
║                                                                  ║
║  ✗ WHAT IT NEVER DOES:                                           ║
║    • Diagnose any condition (this is not a medical device)       ║
║    • Record or transmit audio                                    ║
║    • Contact emergency services on its own                       ║
║                                                                  ║
║  If you believe someone is in danger, call your local            ║
║  emergency services immediately.                                 ║
║                                                                  ║
║  You can view session statistics anytime with:                   ║
║    caresense status                                              ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;
