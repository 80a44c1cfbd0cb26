//! Data chunk lookup and hashing for comparing renders by content.

/// Length of the RIFF/WAVE preamble before the first chunk.
const PREAMBLE_LEN: usize = 12;

/// Walks the RIFF chunks of a WAV buffer, yielding `(id, body)` pairs.
///
/// Stops at the first chunk whose declared size runs past the buffer.
fn riff_chunks<'a>(wav_data: &'a [u8]) -> impl Iterator<Item = (&'a [u8], &'a [u8])> + 'a {
    let mut rest = wav_data.get(PREAMBLE_LEN..).unwrap_or(&[]);
    std::iter::from_fn(move || {
        let header = rest.get(..8)?;
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        let body = rest.get(8..8 + size)?;
        // Chunks are padded to an even length.
        let next = (8 + size + size % 2).min(rest.len());
        let chunk = (&header[..4], body);
        rest = &rest[next..];
        Some(chunk)
    })
}

/// Returns the payload of the `data` chunk, or `None` if `wav_data` is not a
/// well-formed WAVE file.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 44 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }
    riff_chunks(wav_data)
        .find(|(id, _)| *id == b"data")
        .map(|(_, body)| body)
}

/// Hex BLAKE3 digest of the `data` chunk payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
