//! Error types for MIDI decoding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MidiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIDI parse error: {0}")]
    Parse(String),

    #[error("invalid MIDI timing: {0}")]
    InvalidTiming(String),
}

impl From<midly::Error> for MidiError {
    fn from(e: midly::Error) -> Self {
        MidiError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MidiError>;
