//! WAV file format parameters.

/// Sample encoding of the data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    /// 16-bit signed integer PCM.
    #[default]
    Pcm16,
    /// 32-bit IEEE float.
    Float32,
}

impl SampleFormat {
    /// WAVE format tag (1 = PCM, 3 = IEEE float).
    pub(crate) fn format_tag(&self) -> u16 {
        match self {
            SampleFormat::Pcm16 => 1,
            SampleFormat::Float32 => 3,
        }
    }

    /// Bits per sample for this encoding.
    pub fn bits_per_sample(&self) -> u16 {
        match self {
            SampleFormat::Pcm16 => 16,
            SampleFormat::Float32 => 32,
        }
    }
}

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Sample encoding.
    pub sample_format: SampleFormat,
}

impl WavFormat {
    /// Creates a mono WAV format.
    pub fn mono(sample_rate: u32, sample_format: SampleFormat) -> Self {
        Self {
            channels: 1,
            sample_rate,
            sample_format,
        }
    }

    /// Calculates bytes per sample (per channel).
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.sample_format.bits_per_sample() / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub(crate) fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Calculates byte rate (bytes per second).
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}
