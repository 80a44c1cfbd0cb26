//! Karplus-Strong synthesis for plucked string sounds.
//!
//! A period of excitation noise is used as a delay line. On every pass the
//! line is averaged with a one-sample delayed copy of itself, which acts as a
//! lowpass filter: the noise burst smooths into a pitched tone.

use tracing::trace;

use crate::config::checked_sample_count;
use crate::error::{AudioError, AudioResult};
use crate::noise::NoiseBuffer;
use crate::period::{Excitation, ExtractionMethod};
use crate::pitch::frequency_to_period;

/// Default blend factor between the delay line and its delayed copy.
pub const DEFAULT_UPDATE_RATE: f64 = 0.5;

/// Karplus-Strong synthesis parameters.
#[derive(Debug, Clone)]
pub struct KarplusString {
    /// Base frequency in Hz.
    pub frequency: f64,
    /// Length of the rendered note in seconds.
    pub duration_seconds: f64,
    /// Per-pass amplitude loss (0.0 to 1.0). Zero leaves the filter undamped.
    pub decay_rate: f64,
    /// Blend factor for the lowpass step (0.0 to 1.0).
    pub update_rate: f64,
    /// How the initial period is cut from the noise buffer.
    pub excitation: ExtractionMethod,
}

impl KarplusString {
    /// Creates a string with the default update rate, no decay and
    /// decimated excitation.
    pub fn new(frequency: f64, duration_seconds: f64) -> Self {
        Self {
            frequency,
            duration_seconds,
            decay_rate: 0.0,
            update_rate: DEFAULT_UPDATE_RATE,
            excitation: ExtractionMethod::Decimate,
        }
    }

    /// Sets the blend factor.
    pub fn with_update_rate(mut self, update_rate: f64) -> Self {
        self.update_rate = update_rate;
        self
    }

    /// Sets the per-pass decay.
    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    /// Sets the excitation extraction method.
    pub fn with_excitation(mut self, excitation: ExtractionMethod) -> Self {
        self.excitation = excitation;
        self
    }

    /// Renders the note to `round(sample_rate * duration_seconds)` samples.
    ///
    /// The delay line is written out one whole period per pass. One pass
    /// fewer than fits is run, so the tail of the buffer (at least one
    /// period) stays silent and rounding can never push a write past the
    /// end.
    ///
    /// # Errors
    /// - [`AudioError::InvalidDuration`] for non-positive durations and for
    ///   notes longer than
    ///   [`MAX_SAMPLES`](crate::config::MAX_SAMPLES)
    /// - [`AudioError::InvalidParameter`] for rates outside [0, 1]
    /// - errors from [`frequency_to_period`] and [`Excitation::period`]
    pub fn synthesize(&self, noise: &NoiseBuffer, sample_rate: u32) -> AudioResult<Vec<f64>> {
        let excitation = Excitation::prepare(noise, self.excitation)?;
        self.synthesize_with(noise, &excitation, sample_rate)
    }

    /// Like [`synthesize`](Self::synthesize), but cuts the initial period
    /// with an excitation already prepared for `noise`.
    ///
    /// The prepared excitation takes the place of `self.excitation`.
    pub fn synthesize_with(
        &self,
        noise: &NoiseBuffer,
        excitation: &Excitation,
        sample_rate: u32,
    ) -> AudioResult<Vec<f64>> {
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(AudioError::InvalidDuration {
                duration: self.duration_seconds,
            });
        }
        if !(0.0..=1.0).contains(&self.update_rate) {
            return Err(AudioError::invalid_param(
                "update_rate",
                format!("must be between 0 and 1, got {}", self.update_rate),
            ));
        }
        if !(0.0..=1.0).contains(&self.decay_rate) {
            return Err(AudioError::invalid_param(
                "decay_rate",
                format!("must be between 0 and 1, got {}", self.decay_rate),
            ));
        }
        let output_length =
            checked_sample_count((sample_rate as f64 * self.duration_seconds).round()).ok_or(
                AudioError::InvalidDuration {
                    duration: self.duration_seconds,
                },
            )?;

        let period_length = frequency_to_period(self.frequency, sample_rate)?;
        let mut period = excitation.period(noise, period_length)?;

        let num_iterations = (output_length / period_length).saturating_sub(1);
        let gain = 1.0 - self.decay_rate;

        trace!(
            frequency = self.frequency,
            period_length,
            output_length,
            num_iterations,
            "plucking string"
        );

        let mut output = vec![0.0; output_length];
        for chunk in output.chunks_exact_mut(period_length).take(num_iterations) {
            period.blend_with_rotation(self.update_rate);
            if self.decay_rate > 0.0 {
                period.scale(gain);
            }
            chunk.copy_from_slice(period.as_slice());
        }

        Ok(output)
    }
}
