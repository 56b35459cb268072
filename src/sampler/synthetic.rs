//! Simulated audio capture device.
//!
//! Real media acquisition belongs to the surrounding shell; this module stands
//! in for it with a synthesized microphone. A background thread generates
//! time-domain frames (a quiet noise floor with occasional loud bursts),
//! meters them, and delivers [`SignalSample`]s over a bounded channel.
//!
//! The stream is non-restartable: it exists from [`SimulatedCapture::open`]
//! until [`SimulatedCapture::close`] (or Drop), after which the channel
//! disconnects and no further samples arrive.

use crate::sampler::loudness::{waveform_loudness, FRAME_LEN};
use crate::sampler::types::SignalSample;
use crossbeam_channel::{bounded, Receiver, TrySendError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Configuration for the simulated capture device.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Interval between emitted samples
    pub tick: Duration,
    /// Length of each synthesized frame
    pub frame_len: usize,
    /// Per-tick chance of synthesizing a loud burst instead of the noise floor
    pub burst_probability: f64,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(50),
            frame_len: FRAME_LEN,
            burst_probability: 0.05,
            seed: None,
        }
    }
}

/// Errors that can occur when acquiring the capture device.
#[derive(Debug)]
pub enum CaptureError {
    /// The device could not be acquired or the settings are unusable.
    ///
    /// Non-fatal: the caller surfaces a notice and carries on without a
    /// sample feed. Nothing retries automatically.
    Unavailable(String),
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::Unavailable(reason) => {
                write!(f, "capture device unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for CaptureError {}

/// A handle to an open simulated capture stream.
///
/// Dropping the handle closes the stream.
pub struct SimulatedCapture {
    receiver: Receiver<SignalSample>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl SimulatedCapture {
    /// Open the device and start producing samples.
    pub fn open(config: CaptureConfig) -> Result<Self, CaptureError> {
        if config.frame_len == 0 {
            return Err(CaptureError::Unavailable("frame length is zero".to_string()));
        }
        if config.tick.is_zero() {
            return Err(CaptureError::Unavailable("sample tick is zero".to_string()));
        }

        // Bounded so a stalled consumer cannot grow memory without limit.
        let (sender, receiver) = bounded(1024);
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let handle = thread::spawn(move || {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            while flag.load(Ordering::SeqCst) {
                let frame = synthesize_frame(&mut rng, config.frame_len, config.burst_probability);
                let level = waveform_loudness(&frame);
                if let Ok(sample) = SignalSample::now(level) {
                    match sender.try_send(sample) {
                        Ok(()) => {}
                        // Stale meter readings are worthless; drop when full.
                        Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                }
                thread::sleep(config.tick);
            }
        });

        Ok(Self {
            receiver,
            running,
            thread_handle: Some(handle),
        })
    }

    /// Receiver for the sample stream.
    pub fn samples(&self) -> &Receiver<SignalSample> {
        &self.receiver
    }

    /// Try to receive a sample without blocking.
    pub fn try_recv(&self) -> Option<SignalSample> {
        self.receiver.try_recv().ok()
    }

    /// Check whether the stream is still producing.
    pub fn is_open(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the producer and wait for it to exit.
    ///
    /// After this returns, buffered samples can still be drained; once they
    /// are, the channel reports disconnection. Closing twice is a no-op.
    pub fn close(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SimulatedCapture {
    fn drop(&mut self) {
        self.close();
    }
}

/// Synthesize one time-domain frame of white noise.
///
/// Most frames sit on a quiet noise floor; with `burst_probability` the frame
/// is a loud burst whose metered level lands above the detection threshold.
fn synthesize_frame(rng: &mut StdRng, frame_len: usize, burst_probability: f64) -> Vec<f32> {
    let amplitude = if rng.gen::<f64>() < burst_probability {
        rng.gen_range(0.25..0.45)
    } else {
        rng.gen_range(0.002..0.01)
    };
    (0..frame_len)
        .map(|_| rng.gen_range(-amplitude..amplitude) as f32)
        .collect()
}
