//! WAV file writer builder pattern.

use std::path::Path;

use super::format::{SampleFormat, WavFormat};
use super::writer::{encode_samples, write_wav_to_vec};

/// Mono WAV file writer.
#[derive(Debug, Clone, Copy)]
pub struct WavWriter {
    format: WavFormat,
}

impl WavWriter {
    /// Creates a 16-bit PCM writer.
    pub fn mono_pcm16(sample_rate: u32) -> Self {
        Self {
            format: WavFormat::mono(sample_rate, SampleFormat::Pcm16),
        }
    }

    /// Creates a 32-bit float writer.
    pub fn mono_float32(sample_rate: u32) -> Self {
        Self {
            format: WavFormat::mono(sample_rate, SampleFormat::Float32),
        }
    }

    /// The format this writer produces.
    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// Writes mono samples to a byte vector.
    pub fn write_mono(&self, samples: &[f64]) -> Vec<u8> {
        let data = encode_samples(samples, self.format.sample_format);
        write_wav_to_vec(&self.format, &data)
    }

    /// Writes mono samples to a file.
    pub fn write_mono_file(&self, path: impl AsRef<Path>, samples: &[f64]) -> std::io::Result<()> {
        std::fs::write(path, self.write_mono(samples))
    }

    /// BLAKE3 hash of the encoded samples (not the full WAV file).
    pub fn pcm_hash_mono(&self, samples: &[f64]) -> String {
        let data = encode_samples(samples, self.format.sample_format);
        blake3::hash(&data).to_hex().to_string()
    }
}
