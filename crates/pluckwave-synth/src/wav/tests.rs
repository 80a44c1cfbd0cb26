//! Tests for the WAV writer module.

use super::builder::WavWriter;
use super::format::{SampleFormat, WavFormat};
use super::pcm::{compute_pcm_hash, extract_pcm_data};
use super::result::WavResult;
use super::writer::{samples_to_float32, samples_to_pcm16, write_wav_to_vec};

fn u16_at(bytes: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
}

fn u32_at(bytes: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
}

// =========================================================================
// WavFormat tests
// =========================================================================

#[test]
fn test_format_sizes() {
    let pcm = WavFormat::mono(44100, SampleFormat::Pcm16);
    assert_eq!(pcm.bytes_per_sample(), 2);
    assert_eq!(pcm.block_align(), 2);
    assert_eq!(pcm.byte_rate(), 88200);

    let float = WavFormat::mono(44100, SampleFormat::Float32);
    assert_eq!(float.bytes_per_sample(), 4);
    assert_eq!(float.block_align(), 4);
    assert_eq!(float.byte_rate(), 176400);
}

// =========================================================================
// Sample conversion tests
// =========================================================================

#[test]
fn test_pcm16_conversion_clips() {
    let pcm = samples_to_pcm16(&[0.0, 1.0, -1.0, 2.0, -2.0]);
    let values: Vec<i16> = pcm
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect();
    assert_eq!(values, vec![0, 32767, -32767, 32767, -32767]);
}

#[test]
fn test_float32_conversion() {
    let data = samples_to_float32(&[0.5, -0.25]);
    assert_eq!(data.len(), 8);
    assert_eq!(f32::from_le_bytes([data[0], data[1], data[2], data[3]]), 0.5);
    assert_eq!(f32::from_le_bytes([data[4], data[5], data[6], data[7]]), -0.25);
}

// =========================================================================
// Header tests
// =========================================================================

#[test]
fn test_pcm16_header() {
    let wav = WavWriter::mono_pcm16(22050).write_mono(&[0.0; 10]);

    assert_eq!(wav.len(), 44 + 20);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32_at(&wav, 4), wav.len() as u32 - 8);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u32_at(&wav, 16), 16);
    assert_eq!(u16_at(&wav, 20), 1); // PCM
    assert_eq!(u16_at(&wav, 22), 1); // mono
    assert_eq!(u32_at(&wav, 24), 22050);
    assert_eq!(u16_at(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32_at(&wav, 40), 20);
}

#[test]
fn test_float32_header() {
    let wav = WavWriter::mono_float32(44100).write_mono(&[0.0; 3]);

    // 12 RIFF + 26 fmt + 12 fact + 8 data header + 12 payload
    assert_eq!(wav.len(), 70);
    assert_eq!(u32_at(&wav, 4), wav.len() as u32 - 8);
    assert_eq!(u32_at(&wav, 16), 18);
    assert_eq!(u16_at(&wav, 20), 3); // IEEE float
    assert_eq!(u16_at(&wav, 34), 32);
    assert_eq!(&wav[38..42], b"fact");
    assert_eq!(u32_at(&wav, 46), 3);
    assert_eq!(&wav[50..54], b"data");
    assert_eq!(u32_at(&wav, 54), 12);
}

// =========================================================================
// Extraction and hashing tests
// =========================================================================

#[test]
fn test_extract_pcm_data_skips_fact_chunk() {
    let samples = [0.5, -0.5, 0.25];
    let wav = WavWriter::mono_float32(44100).write_mono(&samples);
    assert_eq!(extract_pcm_data(&wav).unwrap(), samples_to_float32(&samples).as_slice());
}

#[test]
fn test_extract_pcm_data_rejects_garbage() {
    assert!(extract_pcm_data(b"not a wav").is_none());
    assert!(extract_pcm_data(&[0u8; 64]).is_none());
}

#[test]
fn test_pcm_hash_matches_result() {
    let samples: Vec<f64> = (0..100).map(|i| (i as f64 * 0.1).sin()).collect();
    let result = WavResult::from_mono(&samples, 44100, SampleFormat::Pcm16);

    assert_eq!(compute_pcm_hash(&result.wav_data).unwrap(), result.pcm_hash);
    assert_eq!(
        WavWriter::mono_pcm16(44100).pcm_hash_mono(&samples),
        result.pcm_hash
    );
    assert_eq!(result.num_samples, 100);
}

#[test]
fn test_identical_samples_identical_bytes() {
    let samples = vec![0.1, 0.2, -0.3];
    let format = WavFormat::mono(44100, SampleFormat::Pcm16);
    let a = write_wav_to_vec(&format, &samples_to_pcm16(&samples));
    let b = WavWriter::mono_pcm16(44100).write_mono(&samples);
    assert_eq!(a, b);
}

#[test]
fn test_result_duration() {
    let result = WavResult::from_mono(&[0.0; 22050], 44100, SampleFormat::Float32);
    assert_eq!(result.duration_seconds(), 0.5);
    assert_eq!(result.sample_format, SampleFormat::Float32);
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.wav");
    let result = WavResult::from_mono(&[0.0, 0.5], 8000, SampleFormat::Pcm16);
    result.write_to(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), result.wav_data);
}

#[test]
fn test_writer_file_matches_vec() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mono.wav");
    let samples = [0.0, 0.25, -0.5, 1.0];
    let writer = WavWriter::mono_float32(22050);
    writer.write_mono_file(&path, &samples).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), writer.write_mono(&samples));
}

#[test]
fn test_writer_file_reports_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("mono.wav");
    assert!(WavWriter::mono_pcm16(8000)
        .write_mono_file(&path, &[0.0])
        .is_err());
}
