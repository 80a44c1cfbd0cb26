//! [`NoteSource`] implementation for MIDI files on disk.

use std::path::{Path, PathBuf};

use pluckwave_synth::{DecodeError, NoteEvent, NoteSource};

use crate::file::load_notes;

/// A Standard MIDI File read lazily on [`NoteSource::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFileSource {
    path: PathBuf,
}

impl MidiFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteSource for MidiFileSource {
    fn source_id(&self) -> String {
        self.path.display().to_string()
    }

    fn decode(&self) -> Result<Vec<NoteEvent>, DecodeError> {
        load_notes(&self.path).map_err(|e| DecodeError::new(self.source_id(), e.to_string()))
    }
}
