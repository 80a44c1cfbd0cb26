//! Render configuration.
//!
//! Every field has a default, so `{}` is a complete configuration. Files are
//! JSON; unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};
use crate::karplus::DEFAULT_UPDATE_RATE;
use crate::noise::DEFAULT_NOISE_CAPACITY;
use crate::period::ExtractionMethod;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default excitation seed.
pub const DEFAULT_SEED: u32 = 39;

/// Default silent tail appended after the last note, in musical seconds.
pub const DEFAULT_GUARD_SECONDS: f64 = 3.9;

/// Longest buffer a note or a piece may occupy, in samples (about 13.5
/// hours at 44.1 kHz).
pub const MAX_SAMPLES: usize = 1 << 31;

/// Converts a sample count computed in floating point to `usize`.
///
/// Returns `None` when `count` is negative, not finite or above
/// [`MAX_SAMPLES`], instead of letting the cast saturate.
pub fn checked_sample_count(count: f64) -> Option<usize> {
    if count.is_finite() && (0.0..=MAX_SAMPLES as f64).contains(&count) {
        Some(count as usize)
    } else {
        None
    }
}

/// Parameters for rendering a piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: u32,
    /// Seed for the excitation noise.
    #[serde(default = "default_seed")]
    pub seed: u32,
    /// Number of samples in the excitation noise buffer.
    #[serde(default = "default_noise_capacity")]
    pub noise_capacity: usize,
    /// Tempo divisor: larger values play the piece faster.
    #[serde(default = "default_tempo_coef")]
    pub tempo_coef: f64,
    /// Note length multiplier applied on top of the tempo.
    #[serde(default = "default_delay_coef")]
    pub delay_coef: f64,
    /// Karplus-Strong blend factor (0.0 to 1.0).
    #[serde(default = "default_update_rate")]
    pub update_rate: f64,
    /// Per-pass amplitude loss (0.0 to 1.0).
    #[serde(default)]
    pub decay_rate: f64,
    /// Silent tail after the last note, in musical seconds.
    #[serde(default = "default_guard_seconds")]
    pub guard_seconds: f64,
    /// How each note's excitation is cut from the noise buffer.
    #[serde(default)]
    pub excitation: ExtractionMethod,
    /// Synthesize notes on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_sampling_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_seed() -> u32 {
    DEFAULT_SEED
}

fn default_noise_capacity() -> usize {
    DEFAULT_NOISE_CAPACITY
}

fn default_tempo_coef() -> f64 {
    1.6
}

fn default_delay_coef() -> f64 {
    1.28
}

fn default_update_rate() -> f64 {
    DEFAULT_UPDATE_RATE
}

fn default_guard_seconds() -> f64 {
    DEFAULT_GUARD_SECONDS
}

fn default_parallel() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sampling_rate: default_sampling_rate(),
            seed: default_seed(),
            noise_capacity: default_noise_capacity(),
            tempo_coef: default_tempo_coef(),
            delay_coef: default_delay_coef(),
            update_rate: default_update_rate(),
            decay_rate: 0.0,
            guard_seconds: default_guard_seconds(),
            excitation: ExtractionMethod::default(),
            parallel: default_parallel(),
        }
    }
}

impl RenderConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> AudioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AudioResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> AudioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Samples per musical second at the configured tempo.
    pub fn samples_per_second(&self) -> f64 {
        self.sampling_rate as f64 / self.tempo_coef
    }

    /// Checks every field against its valid range.
    pub fn validate(&self) -> AudioResult<()> {
        if self.sampling_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: self.sampling_rate,
            });
        }
        if self.noise_capacity < 2 {
            return Err(AudioError::InvalidCapacity {
                capacity: self.noise_capacity,
            });
        }
        validate_positive("tempo_coef", self.tempo_coef)?;
        validate_positive("delay_coef", self.delay_coef)?;
        if !self.samples_per_second().is_finite() {
            return Err(AudioError::invalid_param(
                "tempo_coef",
                format!("too small for {} Hz, got {}", self.sampling_rate, self.tempo_coef),
            ));
        }
        validate_unit_interval("update_rate", self.update_rate)?;
        validate_unit_interval("decay_rate", self.decay_rate)?;
        if !self.guard_seconds.is_finite() || self.guard_seconds < 0.0 {
            return Err(AudioError::invalid_param(
                "guard_seconds",
                format!("must be non-negative, got {}", self.guard_seconds),
            ));
        }
        if checked_sample_count((self.guard_seconds * self.samples_per_second()).ceil()).is_none() {
            return Err(AudioError::invalid_param(
                "guard_seconds",
                format!("longer than {} samples, got {}", MAX_SAMPLES, self.guard_seconds),
            ));
        }
        if let ExtractionMethod::Harmonic { harmonics: 0 } = self.excitation {
            return Err(AudioError::InvalidIterationCount { count: 0 });
        }
        Ok(())
    }
}

fn validate_positive(name: &str, value: f64) -> AudioResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AudioError::invalid_param(
            name,
            format!("must be positive, got {}", value),
        ))
    }
}

fn validate_unit_interval(name: &str, value: f64) -> AudioResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AudioError::invalid_param(
            name,
            format!("must be between 0 and 1, got {}", value),
        ))
    }
}
