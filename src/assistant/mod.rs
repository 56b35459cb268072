//! Care assistant chat surface.

pub mod dispatcher;

pub use dispatcher::{detect_topic, Assistant, DEFAULT_REPLY_DELAY, FALLBACK_ADVISORY};
