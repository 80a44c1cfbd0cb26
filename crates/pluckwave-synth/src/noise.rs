//! Excitation noise generation.
//!
//! The noise buffer is the raw material every plucked note is cut from. It is
//! generated once per render from an explicit seed and then only borrowed.

use rand::Rng;
use tracing::debug;

use crate::error::{AudioError, AudioResult};
use crate::rng::create_rng;

/// Default number of samples in the excitation buffer.
pub const DEFAULT_NOISE_CAPACITY: usize = 4096;

/// Standardized excitation noise: zero mean, unit standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBuffer {
    samples: Vec<f64>,
    seed: u32,
}

impl NoiseBuffer {
    /// Generates `capacity` samples of standardized noise from `seed`.
    ///
    /// Uniform draws in [-1, 1) are shifted to zero mean and scaled to unit
    /// population standard deviation.
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidCapacity`] when `capacity < 2`.
    pub fn generate(capacity: usize, seed: u32) -> AudioResult<Self> {
        if capacity < 2 {
            return Err(AudioError::InvalidCapacity { capacity });
        }

        let mut rng = create_rng(seed);
        let mut samples: Vec<f64> = (0..capacity)
            .map(|_| rng.gen::<f64>() * 2.0 - 1.0)
            .collect();

        let n = capacity as f64;
        let mean = samples.iter().sum::<f64>() / n;
        for sample in samples.iter_mut() {
            *sample -= mean;
        }

        let std_dev = (samples.iter().map(|s| s * s).sum::<f64>() / n).sqrt();
        if std_dev > 0.0 {
            for sample in samples.iter_mut() {
                *sample /= std_dev;
            }
        }

        debug!(capacity, seed, "generated excitation noise");
        Ok(Self { samples, seed })
    }

    /// Number of samples in the buffer.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Seed the buffer was generated from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Read-only view of the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Sample mean of `samples`.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation of `samples`.
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    let variance = samples.iter().map(|s| (s - m).powi(2)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}
