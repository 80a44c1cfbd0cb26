//! Harmonic fitting for continuous-domain resampling of periodic waveforms.
//!
//! A waveform of `N` samples is treated as one period and approximated by a sum
//! of `numiter` harmonics. Samples are taken to sit at the centers of their
//! cells, i.e. sample `l` corresponds to position `l + 0.5`, which makes the
//! coefficients a DFT sampled at half-integer offsets.

use std::f64::consts::PI;

use crate::error::{AudioError, AudioResult};

/// Fitted harmonic coefficients for one period of a waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicModel {
    /// `(a_k, b_k)` for `k = 1..=numiter`, index 0 holds harmonic 1.
    coefficients: Vec<(f64, f64)>,
    /// Length of the source period in samples.
    period: usize,
}

impl HarmonicModel {
    /// Fits `numiter` harmonics to `samples`.
    ///
    /// Coefficients are scaled by the energy of their basis function so that
    /// [`evaluate`](Self::evaluate) reproduces the input. Harmonics past the
    /// Nyquist limit (`2k > N`) alias onto lower ones and are stored as zero,
    /// which keeps the fit a least-squares projection: adding harmonics never
    /// increases reconstruction error.
    ///
    /// # Errors
    /// - [`AudioError::InvalidIterationCount`] when `numiter == 0`
    /// - [`AudioError::InvalidPeriodLength`] when `samples` is empty
    pub fn fit(samples: &[f64], numiter: usize) -> AudioResult<Self> {
        if numiter == 0 {
            return Err(AudioError::InvalidIterationCount { count: numiter });
        }
        let n = samples.len();
        if n == 0 {
            return Err(AudioError::InvalidPeriodLength {
                length: 0,
                capacity: 0,
            });
        }

        let omega = 2.0 * PI / n as f64;
        let coefficients = (1..=numiter)
            .map(|k| {
                let weight = if 2 * k < n {
                    2.0 / n as f64
                } else if 2 * k == n {
                    1.0 / n as f64
                } else {
                    return (0.0, 0.0);
                };

                let (a, b) = samples
                    .iter()
                    .enumerate()
                    .fold((0.0, 0.0), |(a, b), (l, &s)| {
                        let phase = (l as f64 + 0.5) * k as f64 * omega;
                        (a + s * phase.cos(), b + s * phase.sin())
                    });
                (a * weight, b * weight)
            })
            .collect();

        Ok(Self {
            coefficients,
            period: n,
        })
    }

    /// Number of fitted harmonics.
    pub fn num_harmonics(&self) -> usize {
        self.coefficients.len()
    }

    /// Length of the period the model was fitted to.
    pub fn period(&self) -> usize {
        self.period
    }

    /// The `(a_k, b_k)` pairs, harmonic 1 first.
    pub fn coefficients(&self) -> &[(f64, f64)] {
        &self.coefficients
    }

    /// Evaluates the model at a continuous position `x`, in source samples.
    pub fn evaluate(&self, x: f64) -> f64 {
        let omega = 2.0 * PI / self.period as f64;
        self.coefficients
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                let phase = x * (i + 1) as f64 * omega;
                a * phase.cos() + b * phase.sin()
            })
            .sum()
    }

    /// Reconstructs the source samples at their cell centers.
    pub fn reconstruct(&self) -> Vec<f64> {
        (0..self.period)
            .map(|l| self.evaluate(l as f64 + 0.5))
            .collect()
    }

    /// Resamples one period of the model to `length` samples.
    pub fn resample(&self, length: usize) -> Vec<f64> {
        let step = self.period as f64 / length as f64;
        (0..length)
            .map(|j| self.evaluate((j as f64 + 0.5) * step))
            .collect()
    }

    /// Mean squared error of the reconstruction against `samples`.
    pub fn mean_squared_error(&self, samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let reconstructed = self.reconstruct();
        samples
            .iter()
            .zip(reconstructed.iter())
            .map(|(s, r)| (s - r).powi(2))
            .sum::<f64>()
            / samples.len() as f64
    }
}
