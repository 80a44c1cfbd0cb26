//! Note input loading.
//!
//! `.json` files are read as an array of note events; anything else is
//! decoded as a Standard MIDI File.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use pluckwave_midi::MidiFileSource;
use pluckwave_synth::{decode_with_timeout, JsonNoteSource, NoteEvent};

/// Default decode timeout in seconds.
pub const DEFAULT_DECODE_TIMEOUT_SECS: f64 = 30.0;

/// Kind of note input, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Json,
    Midi,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputKind::Json,
            _ => InputKind::Midi,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Json => "json",
            InputKind::Midi => "midi",
        }
    }
}

/// Decodes the notes in `path`, giving up after `timeout_secs`.
pub fn load_notes(path: &Path, timeout_secs: f64) -> Result<Vec<NoteEvent>> {
    if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
        bail!("decode timeout must be a positive number of seconds, got {}", timeout_secs);
    }
    let timeout = Duration::from_secs_f64(timeout_secs);

    let notes = match InputKind::from_path(path) {
        InputKind::Json => decode_with_timeout(JsonNoteSource::new(path), timeout)?,
        InputKind::Midi => decode_with_timeout(MidiFileSource::new(path), timeout)?,
    };
    Ok(notes)
}
