//! Signal sampling for the CareSense agent.
//!
//! This module turns raw audio frames into normalized loudness samples and
//! provides a simulated capture device for running the pipeline without real
//! hardware. The shell may substitute any capture backend that feeds
//! [`SignalSample`]s into the session at 1 Hz or better.

pub mod loudness;
pub mod synthetic;
pub mod types;

// Re-export commonly used items
pub use loudness::{frame_loudness, waveform_loudness, FRAME_LEN, LOUDNESS_GAIN};
pub use synthetic::{CaptureConfig, CaptureError, SimulatedCapture};
pub use types::{SampleError, SignalSample};
