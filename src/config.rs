//! Configuration for the CareSense agent.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::DetectorSettings;
use crate::sampler::{CaptureConfig, FRAME_LEN};

/// Main configuration for the monitoring agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Anomaly detector thresholds
    pub detector: DetectorSettings,

    /// Simulated capture parameters
    pub capture: CaptureSettings,

    /// Artificial assistant reply delay
    #[serde(with = "duration_millis_serde")]
    pub reply_delay: Duration,

    /// IANA timezone name used for trend labels
    pub display_timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorSettings::default(),
            capture: CaptureSettings::default(),
            reply_delay: Duration::from_millis(400),
            display_timezone: "UTC".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("caresense-agent")
            .join("config.json")
    }

    /// The display timezone, falling back to UTC if the name is unknown.
    pub fn display_tz(&self) -> chrono_tz::Tz {
        self.display_timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

/// Configuration for the simulated signal capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Milliseconds between emitted samples
    pub tick_ms: u64,
    /// Samples per synthesized waveform frame
    pub frame_len: usize,
    /// Chance that a frame is a loud burst
    pub burst_probability: f64,
    /// Fixed rng seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            frame_len: FRAME_LEN,
            burst_probability: 0.05,
            seed: None,
        }
    }
}

impl CaptureSettings {
    /// Build the capture configuration these settings describe.
    pub fn to_capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            tick: Duration::from_millis(self.tick_ms),
            frame_len: self.frame_len,
            burst_probability: self.burst_probability,
            seed: self.seed,
        }
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration as milliseconds.
mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.detector.loudness_threshold, 0.5);
        assert_eq!(config.detector.fire_probability, 0.02);
        assert_eq!(config.reply_delay, Duration::from_millis(400));
        assert_eq!(config.display_timezone, "UTC");
        assert_eq!(config.capture.tick_ms, 50);
        assert_eq!(config.capture.frame_len, FRAME_LEN);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"reply_delay": 0}"#).unwrap();
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.detector.loudness_threshold, 0.5);
        assert_eq!(config.display_timezone, "UTC");
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.display_timezone = "America/New_York".to_string();
        config.capture.seed = Some(9);

        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.display_timezone, "America/New_York");
        assert_eq!(back.capture.seed, Some(9));
        assert_eq!(back.reply_delay, Duration::from_millis(400));
    }

    #[test]
    fn test_display_tz_fallback() {
        let mut config = Config::default();
        config.display_timezone = "Not/AZone".to_string();
        assert_eq!(config.display_tz(), chrono_tz::UTC);

        config.display_timezone = "Europe/Berlin".to_string();
        assert_eq!(config.display_tz(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_capture_settings_conversion() {
        let settings = CaptureSettings {
            tick_ms: 20,
            frame_len: 512,
            burst_probability: 0.5,
            seed: Some(3),
        };
        let cc = settings.to_capture_config();
        assert_eq!(cc.tick, Duration::from_millis(20));
        assert_eq!(cc.frame_len, 512);
        assert_eq!(cc.seed, Some(3));
    }
}
