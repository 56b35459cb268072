//! Telemetry module for the CareSense agent.
//!
//! This module provides tools for tracking and exposing what the agent
//! processes during a session, supporting caregiver trust.

pub mod log;

// Re-export commonly used types
pub use log::{create_shared_log, ActivityLog, ActivitySnapshot, SharedActivityLog};
