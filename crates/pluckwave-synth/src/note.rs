//! Note events consumed by the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};

/// Highest valid MIDI pitch.
pub const MAX_PITCH: u8 = 127;

/// A single note: MIDI pitch plus start and end time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteEvent {
    /// MIDI pitch (0-127).
    pub pitch: u8,
    /// Onset in seconds.
    pub start_time: f64,
    /// Release in seconds.
    pub end_time: f64,
}

impl NoteEvent {
    /// Creates a note event.
    pub fn new(pitch: u8, start_time: f64, end_time: f64) -> Self {
        Self {
            pitch,
            start_time,
            end_time,
        }
    }

    /// Length of the note in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Checks pitch range and time ordering.
    ///
    /// `index` is the position of the event in its sequence and is carried
    /// into the error so the offending event can be reported.
    pub fn validate(&self, index: usize) -> AudioResult<()> {
        let reason = if self.pitch > MAX_PITCH {
            Some(format!("pitch must be in 0..={}", MAX_PITCH))
        } else if !self.start_time.is_finite() || !self.end_time.is_finite() {
            Some("times must be finite".to_string())
        } else if self.start_time < 0.0 {
            Some("start_time must be non-negative".to_string())
        } else if self.end_time < self.start_time {
            Some("end_time must not precede start_time".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(AudioError::InvalidNoteEvent {
                index,
                event: self.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pitch {} from {:.3}s to {:.3}s",
            self.pitch, self.start_time, self.end_time
        )
    }
}

/// Validates every event, failing on the first violation.
pub fn validate_events(events: &[NoteEvent]) -> AudioResult<()> {
    events
        .iter()
        .enumerate()
        .try_for_each(|(index, event)| event.validate(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_events() {
        let events = vec![
            NoteEvent::new(60, 0.0, 1.0),
            NoteEvent::new(127, 2.0, 2.0),
            NoteEvent::new(0, 0.5, 0.75),
        ];
        assert!(validate_events(&events).is_ok());
    }

    #[test]
    fn test_first_violation_is_reported() {
        let events = vec![
            NoteEvent::new(60, 0.0, 1.0),
            NoteEvent::new(64, 1.0, 0.5),
            NoteEvent::new(200, 0.0, 1.0),
        ];
        match validate_events(&events) {
            Err(AudioError::InvalidNoteEvent { index, event, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(event, "pitch 64 from 1.000s to 0.500s");
                assert!(reason.contains("end_time"));
            }
            other => panic!("expected InvalidNoteEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_rejections() {
        assert!(NoteEvent::new(128, 0.0, 1.0).validate(0).is_err());
        assert!(NoteEvent::new(60, -0.1, 1.0).validate(0).is_err());
        assert!(NoteEvent::new(60, 0.0, f64::NAN).validate(0).is_err());
        assert!(NoteEvent::new(60, f64::INFINITY, f64::INFINITY)
            .validate(0)
            .is_err());
    }

    #[test]
    fn test_note_event_serde() {
        let json = r#"{"pitch": 67, "start_time": 1.0, "end_time": 2.5}"#;
        let event: NoteEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, NoteEvent::new(67, 1.0, 2.5));
        assert_eq!(event.duration(), 1.5);
    }
}
