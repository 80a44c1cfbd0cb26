//! MIDI pitch, frequency and delay-line period conversion.

use crate::error::{AudioError, AudioResult};

/// Convert a MIDI pitch number to frequency in Hz.
///
/// Uses `f = 55 * 2^(pitch/12 - 2.75)`, which places A4 (MIDI 69) at 440 Hz.
/// Defined for any integer; callers should reject pitches outside 0..=127.
///
/// # Examples
/// ```
/// use pluckwave_synth::pitch::pitch_to_frequency;
///
/// assert!((pitch_to_frequency(69) - 440.0).abs() < 1e-9);
/// assert!((pitch_to_frequency(57) - 220.0).abs() < 1e-9);
/// ```
pub fn pitch_to_frequency(pitch: i32) -> f64 {
    55.0 * 2.0_f64.powf(pitch as f64 / 12.0 - 2.75)
}

/// Convert a frequency in Hz to the nearest MIDI pitch (0-127).
pub fn frequency_to_pitch(freq: f64) -> u8 {
    let note = 69.0 + 12.0 * (freq / 440.0).log2();
    note.round().clamp(0.0, 127.0) as u8
}

/// Convert a frequency to a delay-line length in samples: `ceil(sample_rate / freq)`.
///
/// # Errors
/// Returns [`AudioError::NonPositiveFrequency`] when `freq` is not a positive
/// finite number.
///
/// # Examples
/// ```
/// use pluckwave_synth::pitch::frequency_to_period;
///
/// assert_eq!(frequency_to_period(44100.0, 44100).unwrap(), 1);
/// assert_eq!(frequency_to_period(22050.0, 44100).unwrap(), 2);
/// assert_eq!(frequency_to_period(440.0, 44100).unwrap(), 101);
/// ```
pub fn frequency_to_period(freq: f64, sample_rate: u32) -> AudioResult<usize> {
    if !freq.is_finite() || freq <= 0.0 {
        return Err(AudioError::NonPositiveFrequency { freq });
    }
    Ok((sample_rate as f64 / freq).ceil() as usize)
}
