//! Alert event types for the CareSense agent.
//!
//! Anomaly kinds form a closed set so every consumer matches exhaustively;
//! the label, severity weight, and advisory text for each kind live here as
//! the single associated-data table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kinds of health anomaly the agent recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// A possible fall
    Fall,
    /// An irregular breathing pattern
    Breathing,
    /// Slurred speech
    Speech,
}

impl AnomalyKind {
    /// All recognized kinds.
    pub const ALL: [AnomalyKind; 3] = [
        AnomalyKind::Fall,
        AnomalyKind::Breathing,
        AnomalyKind::Speech,
    ];

    /// Human-readable alert label for this kind.
    pub fn label(self) -> &'static str {
        match self {
            AnomalyKind::Fall => "Possible fall detected",
            AnomalyKind::Breathing => "Irregular breathing pattern detected",
            AnomalyKind::Speech => "Slurred speech detected",
        }
    }

    /// Severity weight used by the risk score.
    pub fn weight(self) -> u32 {
        match self {
            AnomalyKind::Fall => 5,
            AnomalyKind::Breathing => 3,
            AnomalyKind::Speech => 4,
        }
    }

    /// Advisory text the assistant offers for this kind.
    pub fn advisory(self) -> &'static str {
        match self {
            AnomalyKind::Fall => {
                "Detected a potential fall. If unresponsive, call emergency services. \
                 If conscious, assess for head injury and avoid sudden movements."
            }
            AnomalyKind::Breathing => {
                "Irregular breathing detected. Sit upright, monitor airway, follow any \
                 rescue plan, and seek medical advice if it persists."
            }
            AnomalyKind::Speech => {
                "Slurred speech detected. Do a FAST check (Face droop, Arm weakness, \
                 Speech difficulty, Time to call 911)."
            }
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnomalyKind::Fall => "fall",
            AnomalyKind::Breathing => "breathing",
            AnomalyKind::Speech => "speech",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for AnomalyKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fall" => Ok(AnomalyKind::Fall),
            "breathing" => Ok(AnomalyKind::Breathing),
            "speech" => Ok(AnomalyKind::Speech),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Error for parsing an anomaly kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl std::fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown anomaly kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

/// Opaque unique identifier of an alert event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(Uuid);

impl AlertId {
    /// Allocate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AlertId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A recorded health anomaly.
///
/// Events are created by a detector firing or by a manual trigger; the two
/// paths produce identical records. The only mutation an event ever sees is
/// resolution, and that never reverts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Unique for the lifetime of the store
    pub id: AlertId,
    /// Classified anomaly kind
    pub kind: AnomalyKind,
    /// Display label, derived from the kind at creation
    pub label: String,
    /// Instant of creation
    pub timestamp: DateTime<Utc>,
    /// Whether a caregiver marked this event handled
    pub resolved: bool,
}

impl AlertEvent {
    /// Create an unresolved event with a fresh id.
    pub fn new(kind: AnomalyKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: AlertId::new(),
            kind,
            label: kind.label().to_string(),
            timestamp,
            resolved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(AnomalyKind::Fall.label(), "Possible fall detected");
        assert_eq!(
            AnomalyKind::Breathing.label(),
            "Irregular breathing pattern detected"
        );
        assert_eq!(AnomalyKind::Speech.label(), "Slurred speech detected");
    }

    #[test]
    fn test_kind_weights() {
        assert_eq!(AnomalyKind::Fall.weight(), 5);
        assert_eq!(AnomalyKind::Breathing.weight(), 3);
        assert_eq!(AnomalyKind::Speech.weight(), 4);
    }

    #[test]
    fn test_every_kind_has_advisory_text() {
        for kind in AnomalyKind::ALL {
            assert!(!kind.advisory().is_empty());
            assert!(kind.label().contains("detected"));
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("fall".parse::<AnomalyKind>().unwrap(), AnomalyKind::Fall);
        assert_eq!(" Breathing ".parse::<AnomalyKind>().unwrap(), AnomalyKind::Breathing);
        assert_eq!("SPEECH".parse::<AnomalyKind>().unwrap(), AnomalyKind::Speech);
        assert!("cough".parse::<AnomalyKind>().is_err());
    }

    #[test]
    fn test_alert_ids_unique() {
        assert_ne!(AlertId::new(), AlertId::new());
    }

    #[test]
    fn test_alert_id_round_trips_display() {
        let id = AlertId::new();
        let parsed: AlertId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_new_event_is_unresolved() {
        let event = AlertEvent::new(AnomalyKind::Fall, Utc::now());
        assert!(!event.resolved);
        assert_eq!(event.label, "Possible fall detected");
    }

    #[test]
    fn test_event_serde_contract() {
        let event = AlertEvent::new(AnomalyKind::Speech, Utc::now());
        let json = serde_json::to_string(&event).unwrap();
        for field in ["id", "kind", "label", "timestamp", "resolved"] {
            assert!(json.contains(field), "missing field {field}");
        }
        let back: AlertEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
