//! pluckwave synthesis engine
//!
//! Renders a sequence of note events `(pitch, start, end)` to a mono buffer
//! using Karplus-Strong plucked-string synthesis.
//!
//! # Overview
//!
//! - A [`NoiseBuffer`] of standardized noise is generated once from a seed.
//! - For each note, a period of that noise sized to the note's pitch is
//!   extracted ([`period::extract`]) and evolved through the Karplus-Strong
//!   delay line ([`KarplusString`]).
//! - The [`PieceRenderer`] overlap-adds all notes at their onsets and peak
//!   normalizes the result.
//!
//! # Determinism
//!
//! Given the same events, configuration and seed, the output is bit-identical
//! across runs, including when notes are synthesized in parallel. No global
//! RNG state is involved: the seed travels in [`RenderConfig`].
//!
//! # Example
//!
//! ```
//! use pluckwave_synth::{NoteEvent, PieceRenderer, RenderConfig};
//!
//! let renderer = PieceRenderer::new(RenderConfig::default())?;
//! let output = renderer.render(&[NoteEvent::new(60, 0.0, 0.5)])?;
//! assert_eq!(output.sample_rate, 44100);
//! # Ok::<(), pluckwave_synth::AudioError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`config`] - Render configuration with JSON loading
//! - [`harmonic`] - Harmonic fitting and continuous resampling
//! - [`karplus`] - Karplus-Strong delay-line synthesis
//! - [`noise`] - Excitation noise generation
//! - [`note`] - Note events and validation
//! - [`period`] - Excitation period extraction
//! - [`pitch`] - Pitch, frequency and period conversion
//! - [`render`] - Overlap-add piece rendering
//! - [`rng`] - Deterministic RNG
//! - [`source`] - Note source interface and decode timeouts
//! - [`wav`] - Deterministic WAV file writer

pub mod config;
pub mod error;
pub mod harmonic;
pub mod karplus;
pub mod noise;
pub mod note;
pub mod period;
pub mod pitch;
pub mod render;
pub mod rng;
pub mod source;
pub mod wav;

// Re-export main types at crate root
pub use config::RenderConfig;
pub use error::{AudioError, AudioResult, DecodeError};
pub use harmonic::HarmonicModel;
pub use karplus::KarplusString;
pub use noise::NoiseBuffer;
pub use note::NoteEvent;
pub use period::{Excitation, ExtractionMethod, Period};
pub use render::{render_with_noise, PieceRenderer, RenderOutput, RenderWarning};
pub use source::{decode_with_timeout, JsonNoteSource, NoteSource};
pub use wav::{SampleFormat, WavResult, WavWriter};
