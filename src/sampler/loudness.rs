//! Loudness metering over raw time-domain audio frames.
//!
//! The meter reduces a fixed-size frame to a single normalized level:
//! center the amplitude, take the root mean square, scale by a fixed gain and
//! clamp to `[0, 1]`. The same reduction works for byte frames (unsigned 8-bit
//! with a 128 midpoint, as delivered by browser-style analysers) and float
//! frames already normalized to `[-1, 1]`.

/// Nominal frame length used by the capture backends.
pub const FRAME_LEN: usize = 2048;

/// Fixed gain applied to the raw RMS before clamping.
///
/// Speech at a comfortable distance has an RMS well under 0.25, so a 4x gain
/// maps normal loud speech near the top of the meter.
pub const LOUDNESS_GAIN: f64 = 4.0;

/// Midpoint of an unsigned 8-bit time-domain frame.
const BYTE_MIDPOINT: f64 = 128.0;

/// Compute the normalized loudness of an unsigned 8-bit time-domain frame.
///
/// Each value is centered around 128 and normalized to `[-1, 1]` before the
/// RMS is taken. An empty frame is treated as silence.
pub fn frame_loudness(frame: &[u8]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = frame
        .iter()
        .map(|&v| {
            let centered = (v as f64 - BYTE_MIDPOINT) / BYTE_MIDPOINT;
            centered * centered
        })
        .sum();
    let rms = (sum_squares / frame.len() as f64).sqrt();
    (rms * LOUDNESS_GAIN).min(1.0)
}

/// Compute the normalized loudness of a float frame in `[-1, 1]`.
///
/// Out-of-range input is tolerated; the result is still clamped to `[0, 1]`.
pub fn waveform_loudness(frame: &[f32]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = frame.iter().map(|&v| (v as f64) * (v as f64)).sum();
    let rms = (sum_squares / frame.len() as f64).sqrt();
    (rms * LOUDNESS_GAIN).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_byte_frame_is_zero() {
        let frame = vec![128u8; FRAME_LEN];
        assert_eq!(frame_loudness(&frame), 0.0);
    }

    #[test]
    fn test_full_swing_byte_frame_clamps() {
        // Alternating 0/255 has RMS ~1, which the gain pushes past the clamp.
        let frame: Vec<u8> = (0..FRAME_LEN)
            .map(|i| if i % 2 == 0 { 0 } else { 255 })
            .collect();
        assert_eq!(frame_loudness(&frame), 1.0);
    }

    #[test]
    fn test_byte_frame_known_level() {
        // A constant offset of 32 from the midpoint has RMS 32/128 = 0.25,
        // which the 4x gain maps to exactly 1.0.
        let frame = vec![160u8; FRAME_LEN];
        assert!((frame_loudness(&frame) - 1.0).abs() < 1e-9);

        // Half that offset lands at 0.5.
        let frame = vec![144u8; FRAME_LEN];
        assert!((frame_loudness(&frame) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_frame_is_silence() {
        assert_eq!(frame_loudness(&[]), 0.0);
        assert_eq!(waveform_loudness(&[]), 0.0);
    }

    #[test]
    fn test_waveform_constant_amplitude() {
        let frame = vec![0.1f32; 512];
        let level = waveform_loudness(&frame);
        assert!((level - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_waveform_loud_clamps() {
        let frame = vec![0.9f32; 512];
        assert_eq!(waveform_loudness(&frame), 1.0);
    }
}
