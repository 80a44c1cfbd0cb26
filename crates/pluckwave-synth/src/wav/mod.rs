//! Deterministic mono WAV file writer.
//!
//! Files carry no timestamps or variable metadata, so identical samples always
//! produce identical bytes. The hash of the data chunk can be used to compare
//! renders.

mod builder;
mod format;
mod pcm;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use builder::WavWriter;
pub use format::{SampleFormat, WavFormat};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{encode_samples, samples_to_float32, samples_to_pcm16, write_wav, write_wav_to_vec};
