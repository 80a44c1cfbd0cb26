//! Core WAV writing and sample conversion functions.

use std::io::{self, Write};

use super::format::{SampleFormat, WavFormat};

/// Writes a complete WAV file to a writer.
///
/// PCM files get the canonical 44-byte header. Float files use the extended
/// 18-byte `fmt ` chunk followed by a `fact` chunk, as non-PCM formats
/// require.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, data: &[u8]) -> io::Result<()> {
    let data_size = data.len() as u32;
    let is_float = format.sample_format == SampleFormat::Float32;
    let fmt_size: u32 = if is_float { 18 } else { 16 };
    let fact_size: u32 = if is_float { 12 } else { 0 };
    // Everything after the RIFF size field.
    let riff_size = 4 + (8 + fmt_size) + fact_size + (8 + data_size);

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&fmt_size.to_le_bytes())?;
    writer.write_all(&format.sample_format.format_tag().to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.sample_format.bits_per_sample().to_le_bytes())?;

    if is_float {
        writer.write_all(&0u16.to_le_bytes())?; // cbSize
        let frames = data_size / format.block_align() as u32;
        writer.write_all(b"fact")?;
        writer.write_all(&4u32.to_le_bytes())?;
        writer.write_all(&frames.to_le_bytes())?;
    }

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(58 + data.len());
    write_wav(&mut buffer, format, data).expect("writing to Vec should not fail");
    buffer
}

/// Converts f64 samples to 16-bit PCM bytes.
///
/// Samples are expected to be in range [-1.0, 1.0]. Values outside this range
/// will be clipped.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);

    for &sample in samples {
        let clipped = sample.clamp(-1.0, 1.0);
        let pcm_value = (clipped * 32767.0).round() as i16;
        pcm.extend_from_slice(&pcm_value.to_le_bytes());
    }

    pcm
}

/// Converts f64 samples to little-endian 32-bit float bytes, unclipped.
pub fn samples_to_float32(samples: &[f64]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 4);
    for &sample in samples {
        data.extend_from_slice(&(sample as f32).to_le_bytes());
    }
    data
}

/// Encodes samples in the given format.
pub fn encode_samples(samples: &[f64], sample_format: SampleFormat) -> Vec<u8> {
    match sample_format {
        SampleFormat::Pcm16 => samples_to_pcm16(samples),
        SampleFormat::Float32 => samples_to_float32(samples),
    }
}
