//! Note sources: where note events come from.
//!
//! The engine only needs a sequence of [`NoteEvent`]s. Anything that can
//! produce one (a MIDI decoder, a JSON file, a literal list) implements
//! [`NoteSource`]; the renderer never sees how the decoding happened.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use tracing::debug;

use crate::error::DecodeError;
use crate::note::NoteEvent;

/// Producer of note events.
pub trait NoteSource {
    /// Identifier used in error reports (usually a path).
    fn source_id(&self) -> String;

    /// Decodes the full event list.
    ///
    /// This may block for as long as the underlying decoder needs.
    fn decode(&self) -> Result<Vec<NoteEvent>, DecodeError>;
}

impl NoteSource for Vec<NoteEvent> {
    fn source_id(&self) -> String {
        "<memory>".to_string()
    }

    fn decode(&self) -> Result<Vec<NoteEvent>, DecodeError> {
        Ok(self.clone())
    }
}

/// A JSON file holding an array of note events.
///
/// ```json
/// [{"pitch": 60, "start_time": 0.0, "end_time": 1.0}]
/// ```
#[derive(Debug, Clone)]
pub struct JsonNoteSource {
    path: PathBuf,
}

impl JsonNoteSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NoteSource for JsonNoteSource {
    fn source_id(&self) -> String {
        self.path.display().to_string()
    }

    fn decode(&self) -> Result<Vec<NoteEvent>, DecodeError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| DecodeError::new(self.source_id(), e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| DecodeError::new(self.source_id(), e.to_string()))
    }
}

/// Runs `source.decode()` on a worker thread and waits at most `timeout`.
///
/// The failure is returned as-is and never retried. On timeout the worker is
/// left to finish in the background; its result is discarded.
pub fn decode_with_timeout<S>(source: S, timeout: Duration) -> Result<Vec<NoteEvent>, DecodeError>
where
    S: NoteSource + Send + 'static,
{
    let source_id = source.source_id();
    let (tx, rx) = crossbeam_channel::bounded(1);

    thread::Builder::new()
        .name("note-decode".to_string())
        .spawn(move || {
            // The receiver may be gone after a timeout.
            let _ = tx.send(source.decode());
        })
        .map_err(|e| DecodeError::new(&source_id, format!("failed to start decoder: {}", e)))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            if let Ok(events) = &result {
                debug!(source = %source_id, notes = events.len(), "decoded note source");
            }
            result
        }
        Err(RecvTimeoutError::Timeout) => Err(DecodeError::new(
            source_id,
            format!("timed out after {:.1}s", timeout.as_secs_f64()),
        )),
        Err(RecvTimeoutError::Disconnected) => Err(DecodeError::new(
            source_id,
            "decoder stopped without producing a result",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    struct SlowSource;

    impl NoteSource for SlowSource {
        fn source_id(&self) -> String {
            "slow".to_string()
        }

        fn decode(&self) -> Result<Vec<NoteEvent>, DecodeError> {
            thread::sleep(Duration::from_millis(500));
            Ok(Vec::new())
        }
    }

    struct BrokenSource;

    impl NoteSource for BrokenSource {
        fn source_id(&self) -> String {
            "broken.mid".to_string()
        }

        fn decode(&self) -> Result<Vec<NoteEvent>, DecodeError> {
            Err(DecodeError::new(self.source_id(), "not a MIDI file"))
        }
    }

    struct PanickingSource;

    impl NoteSource for PanickingSource {
        fn source_id(&self) -> String {
            "panics".to_string()
        }

        fn decode(&self) -> Result<Vec<NoteEvent>, DecodeError> {
            panic!("decoder crashed");
        }
    }

    #[test]
    fn test_memory_source_roundtrip() {
        let events = vec![NoteEvent::new(60, 0.0, 1.0)];
        let decoded = decode_with_timeout(events.clone(), Duration::from_secs(5)).unwrap();
        assert_eq!(decoded, events);
    }

    #[test]
    fn test_timeout_is_reported() {
        let err = decode_with_timeout(SlowSource, Duration::from_millis(20)).unwrap_err();
        assert_eq!(err.source_id, "slow");
        assert!(err.message.contains("timed out"));
    }

    #[test]
    fn test_decode_error_propagates_unchanged() {
        let err = decode_with_timeout(BrokenSource, Duration::from_secs(5)).unwrap_err();
        assert_eq!(err, DecodeError::new("broken.mid", "not a MIDI file"));
    }

    #[test]
    fn test_panicking_decoder() {
        let err = decode_with_timeout(PanickingSource, Duration::from_secs(5)).unwrap_err();
        assert_eq!(err.source_id, "panics");
    }

    #[test]
    fn test_json_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"pitch": 60, "start_time": 0.0, "end_time": 1.0}},
               {{"pitch": 64, "start_time": 0.5, "end_time": 1.5}}]"#
        )
        .unwrap();

        let source = JsonNoteSource::new(file.path());
        let events = source.decode().unwrap();
        assert_eq!(
            events,
            vec![NoteEvent::new(60, 0.0, 1.0), NoteEvent::new(64, 0.5, 1.5)]
        );
    }

    #[test]
    fn test_json_source_reports_path() {
        let source = JsonNoteSource::new("/nonexistent/notes.json");
        let err = source.decode().unwrap_err();
        assert_eq!(err.source_id, "/nonexistent/notes.json");
    }
}
