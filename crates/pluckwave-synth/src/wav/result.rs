//! WAV file generation result type.

use std::path::Path;

use crate::render::RenderOutput;

use super::format::{SampleFormat, WavFormat};
use super::writer::{encode_samples, write_wav_to_vec};

/// Result of WAV file generation.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the data chunk only.
    pub pcm_hash: String,
    /// Sample encoding.
    pub sample_format: SampleFormat,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Creates a WavResult from mono samples.
    pub fn from_mono(samples: &[f64], sample_rate: u32, sample_format: SampleFormat) -> Self {
        let data = encode_samples(samples, sample_format);
        let pcm_hash = blake3::hash(&data).to_hex().to_string();
        let format = WavFormat::mono(sample_rate, sample_format);
        let wav_data = write_wav_to_vec(&format, &data);

        Self {
            wav_data,
            pcm_hash,
            sample_format,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Creates a WavResult from a finished render.
    pub fn from_render(output: &RenderOutput, sample_format: SampleFormat) -> Self {
        Self::from_mono(&output.samples, output.sample_rate, sample_format)
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the WAV bytes to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.wav_data)
    }
}
