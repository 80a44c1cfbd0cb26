//! Error types for the synthesis engine.

use thiserror::Error;

/// Result type for synthesis operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while synthesizing or rendering.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Noise buffer capacity cannot hold a standardized signal.
    #[error("invalid noise capacity: {capacity} (must be at least 2 samples)")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },

    /// Requested period length does not fit the noise buffer.
    #[error("invalid period length: {length} (must be in 1..={capacity})")]
    InvalidPeriodLength {
        /// The rejected period length.
        length: usize,
        /// Capacity of the buffer the period was requested from.
        capacity: usize,
    },

    /// Frequency is zero, negative or not finite.
    #[error("frequency must be positive, got {freq} Hz")]
    NonPositiveFrequency {
        /// The rejected frequency.
        freq: f64,
    },

    /// Unknown excitation extraction method.
    #[error("unsupported extraction method '{name}' (expected truncate, decimate or harmonic)")]
    UnsupportedMethod {
        /// The name that failed to parse.
        name: String,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Harmonic count of zero.
    #[error("invalid harmonic iteration count: {count} (must be at least 1)")]
    InvalidIterationCount {
        /// The rejected count.
        count: usize,
    },

    /// A note event failed validation.
    #[error("invalid note event #{index} ({event}): {reason}")]
    InvalidNoteEvent {
        /// Position of the event in the input sequence.
        index: usize,
        /// Display form of the event.
        event: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Synthesis of a specific note failed.
    #[error("note #{index} (pitch {pitch}) failed: {source}")]
    Note {
        /// Position of the event in the input sequence.
        index: usize,
        /// MIDI pitch of the event.
        pitch: u8,
        /// Underlying failure.
        source: Box<AudioError>,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wraps an error raised while synthesizing the note at `index`.
    pub fn for_note(index: usize, pitch: u8, source: AudioError) -> Self {
        Self::Note {
            index,
            pitch,
            source: Box::new(source),
        }
    }

    /// Returns a stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidCapacity { .. } => "AUDIO_001",
            AudioError::InvalidPeriodLength { .. } => "AUDIO_002",
            AudioError::NonPositiveFrequency { .. } => "AUDIO_003",
            AudioError::UnsupportedMethod { .. } => "AUDIO_004",
            AudioError::InvalidDuration { .. } => "AUDIO_005",
            AudioError::InvalidIterationCount { .. } => "AUDIO_006",
            AudioError::InvalidNoteEvent { .. } => "AUDIO_007",
            AudioError::Note { .. } => "AUDIO_008",
            AudioError::InvalidSampleRate { .. } => "AUDIO_009",
            AudioError::InvalidParameter { .. } => "AUDIO_010",
            AudioError::Config(_) => "AUDIO_011",
            AudioError::Io(_) => "AUDIO_012",
        }
    }
}

/// Failure reported by a [`NoteSource`](crate::source::NoteSource).
///
/// The engine does not interpret the message; it only carries the identifier
/// of the source that failed so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode '{source_id}': {message}")]
pub struct DecodeError {
    /// Identifier of the source (usually a path).
    pub source_id: String,
    /// Human-readable reason.
    pub message: String,
}

impl DecodeError {
    /// Creates a decode error for `source_id`.
    pub fn new(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            message: message.into(),
        }
    }
}
