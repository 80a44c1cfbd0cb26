//! Excitation period extraction from the noise buffer.
//!
//! Every note starts from a slice of the shared [`NoiseBuffer`] sized to one
//! period of its fundamental. How the buffer is reduced to that size shapes
//! the spectrum of the pluck: truncation keeps the full-band noise, decimation
//! spreads the pick over the whole buffer, and the harmonic method resamples a
//! band-limited fit of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AudioError, AudioResult};
use crate::harmonic::HarmonicModel;
use crate::noise::NoiseBuffer;

/// Default number of harmonics for [`ExtractionMethod::Harmonic`].
pub const DEFAULT_HARMONICS: usize = 32;

/// How a period is cut from the noise buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// First `length` samples verbatim.
    Truncate,
    /// Every `capacity / length`-th sample.
    #[default]
    Decimate,
    /// Band-limited harmonic fit of the whole buffer, resampled to `length`.
    Harmonic {
        /// Number of harmonics to fit.
        harmonics: usize,
    },
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::Truncate => write!(f, "truncate"),
            ExtractionMethod::Decimate => write!(f, "decimate"),
            ExtractionMethod::Harmonic { harmonics } => write!(f, "harmonic:{}", harmonics),
        }
    }
}

impl FromStr for ExtractionMethod {
    type Err = AudioError;

    /// Parses `truncate`, `decimate`, `harmonic` or `harmonic:<count>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || AudioError::UnsupportedMethod {
            name: s.to_string(),
        };
        let lower = s.trim().to_ascii_lowercase();
        match lower.split_once(':') {
            None => match lower.as_str() {
                "truncate" => Ok(ExtractionMethod::Truncate),
                "decimate" => Ok(ExtractionMethod::Decimate),
                "harmonic" => Ok(ExtractionMethod::Harmonic {
                    harmonics: DEFAULT_HARMONICS,
                }),
                _ => Err(unsupported()),
            },
            Some(("harmonic", count)) => {
                let harmonics = count.parse::<usize>().map_err(|_| unsupported())?;
                Ok(ExtractionMethod::Harmonic { harmonics })
            }
            Some(_) => Err(unsupported()),
        }
    }
}

/// One period of excitation, used as a circular delay line.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    samples: Vec<f64>,
}

impl Period {
    /// Wraps existing samples as a period.
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Period length in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the period is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view of the samples.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Consumes the period and returns its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// One Karplus-Strong step: blend the period with itself delayed by one
    /// sample (the last sample wraps to the front).
    ///
    /// `period = period * (1 - update_rate) + rotated * update_rate`
    pub fn blend_with_rotation(&mut self, update_rate: f64) {
        let Some(&last) = self.samples.last() else {
            return;
        };
        let keep = 1.0 - update_rate;

        // Walk forward carrying the pre-update value of the previous slot,
        // which is exactly the rotated sample for the current slot.
        let mut delayed = last;
        for sample in self.samples.iter_mut() {
            let current = *sample;
            *sample = current * keep + delayed * update_rate;
            delayed = current;
        }
    }

    /// Multiplies every sample by `gain`.
    pub fn scale(&mut self, gain: f64) {
        for sample in self.samples.iter_mut() {
            *sample *= gain;
        }
    }
}

/// Extracts exactly `length` samples of excitation from `buffer`.
///
/// Prepares a one-off [`Excitation`]; use that directly to cut many periods
/// from the same buffer.
///
/// # Errors
/// - [`AudioError::InvalidPeriodLength`] unless `0 < length <= capacity`
/// - [`AudioError::InvalidIterationCount`] for a harmonic method with zero harmonics
pub fn extract(
    buffer: &NoiseBuffer,
    length: usize,
    method: ExtractionMethod,
) -> AudioResult<Period> {
    Excitation::prepare(buffer, method)?.period(buffer, length)
}

/// An extraction method readied for one noise buffer.
///
/// The harmonic method fits its model of the whole buffer once, here, and
/// every period cut afterwards only resamples it.
#[derive(Debug, Clone, PartialEq)]
pub struct Excitation {
    method: ExtractionMethod,
    model: Option<HarmonicModel>,
}

impl Excitation {
    /// Prepares `method` for cutting periods from `buffer`.
    ///
    /// # Errors
    /// [`AudioError::InvalidIterationCount`] for a harmonic method with zero harmonics.
    pub fn prepare(buffer: &NoiseBuffer, method: ExtractionMethod) -> AudioResult<Self> {
        let model = match method {
            ExtractionMethod::Harmonic { harmonics } => {
                let model = HarmonicModel::fit(buffer.samples(), harmonics)?;
                debug!(harmonics, capacity = buffer.capacity(), "fitted harmonic excitation");
                Some(model)
            }
            ExtractionMethod::Truncate | ExtractionMethod::Decimate => None,
        };
        Ok(Self { method, model })
    }

    /// The method this excitation was prepared for.
    pub fn method(&self) -> ExtractionMethod {
        self.method
    }

    /// Cuts a period of `length` samples from `buffer`, which must be the
    /// buffer passed to [`prepare`](Self::prepare).
    ///
    /// # Errors
    /// [`AudioError::InvalidPeriodLength`] unless `0 < length <= capacity`.
    pub fn period(&self, buffer: &NoiseBuffer, length: usize) -> AudioResult<Period> {
        let capacity = buffer.capacity();
        if length == 0 || length > capacity {
            return Err(AudioError::InvalidPeriodLength { length, capacity });
        }
        let source = buffer.samples();

        let samples = match (&self.model, self.method) {
            (Some(model), _) => model.resample(length),
            (None, ExtractionMethod::Truncate) => source[..length].to_vec(),
            (None, _) => {
                let stride = capacity / length;
                // stride * length <= capacity, so the stride always yields
                // `length` samples and the padding below never fires.
                debug_assert!(stride * length <= capacity);
                let mut samples: Vec<f64> =
                    source.iter().step_by(stride).take(length).copied().collect();
                if let Some(&last) = samples.last() {
                    samples.resize(length, last);
                }
                samples
            }
        };

        Ok(Period::from_samples(samples))
    }
}
