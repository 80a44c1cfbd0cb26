//! Standard MIDI File decoding for pluckwave.
//!
//! Turns `.mid` files into the [`NoteEvent`](pluckwave_synth::NoteEvent)
//! sequences consumed by the synthesis engine, and exposes them through the
//! engine's [`NoteSource`](pluckwave_synth::NoteSource) interface.
//!
//! Only note timing and pitch are kept. Tempo changes from every track are
//! merged into one map before ticks are converted to seconds.

pub mod error;
pub mod file;
pub mod source;

pub use error::{MidiError, Result};
pub use file::{load_notes, parse_notes, DEFAULT_TEMPO_US_PER_QUARTER};
pub use source::MidiFileSource;
