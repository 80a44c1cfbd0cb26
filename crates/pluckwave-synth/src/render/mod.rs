//! Piece rendering: synthesize every note and overlap-add them.
//!
//! Notes are independent of each other, so synthesis runs on the rayon pool
//! in fixed-size batches. Each batch is merged into the master buffer by the
//! rendering thread in event order, which makes parallel and sequential
//! renders bit-identical.

mod master;

#[cfg(test)]
mod tests_master;
#[cfg(test)]
mod tests_render;

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, warn};

pub use master::{peak, MasterBuffer};

use crate::config::{checked_sample_count, RenderConfig, MAX_SAMPLES};
use crate::error::{AudioError, AudioResult};
use crate::karplus::KarplusString;
use crate::noise::NoiseBuffer;
use crate::note::{validate_events, NoteEvent};
use crate::period::Excitation;
use crate::pitch::pitch_to_frequency;

/// Notes synthesized concurrently before merging into the master buffer.
const SYNTH_BATCH_SIZE: usize = 64;

/// Non-fatal conditions observed while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderWarning {
    /// The piece rendered to silence; normalization was skipped.
    EmptyRender,
    /// A note ran past the end of the master buffer and was cut.
    TruncatedNote {
        /// Position of the event in the input sequence.
        index: usize,
        /// Number of samples dropped.
        dropped_samples: usize,
    },
}

impl RenderWarning {
    /// Returns a stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            RenderWarning::EmptyRender => "W001",
            RenderWarning::TruncatedNote { .. } => "W002",
        }
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::EmptyRender => {
                write!(f, "rendered piece is silent; peak normalization skipped")
            }
            RenderWarning::TruncatedNote {
                index,
                dropped_samples,
            } => write!(
                f,
                "note #{} ran past the end of the piece; {} samples dropped",
                index, dropped_samples
            ),
        }
    }
}

/// A finished render: mono samples in [-1, 1] plus format information.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Peak-normalized samples.
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count (always 1).
    pub channels: u16,
    /// Non-fatal conditions observed while rendering.
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutput {
    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Whether the render produced only silence.
    pub fn is_silent(&self) -> bool {
        self.warnings.contains(&RenderWarning::EmptyRender)
    }
}

/// Renders note sequences with one shared excitation buffer.
///
/// The excitation is prepared once on construction, so harmonic
/// excitation fits its model a single time for every render.
#[derive(Debug, Clone)]
pub struct PieceRenderer {
    config: RenderConfig,
    noise: NoiseBuffer,
    excitation: Excitation,
}

impl PieceRenderer {
    /// Validates `config` and generates the excitation noise from its seed.
    pub fn new(config: RenderConfig) -> AudioResult<Self> {
        config.validate()?;
        let noise = NoiseBuffer::generate(config.noise_capacity, config.seed)?;
        Self::with_noise(config, noise)
    }

    /// Uses an existing noise buffer instead of generating one.
    pub fn with_noise(config: RenderConfig, noise: NoiseBuffer) -> AudioResult<Self> {
        config.validate()?;
        let excitation = Excitation::prepare(&noise, config.excitation)?;
        Ok(Self {
            config,
            noise,
            excitation,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The shared excitation buffer.
    pub fn noise(&self) -> &NoiseBuffer {
        &self.noise
    }

    /// The prepared excitation shared by every note.
    pub fn excitation(&self) -> &Excitation {
        &self.excitation
    }

    /// Renders `events` into a peak-normalized buffer.
    pub fn render(&self, events: &[NoteEvent]) -> AudioResult<RenderOutput> {
        render_prepared(events, &self.config, &self.noise, &self.excitation)
    }
}

/// Renders `events` with an explicit noise buffer.
///
/// # Errors
/// - configuration errors from [`RenderConfig::validate`]
/// - [`AudioError::InvalidNoteEvent`] for the first malformed event, or for
///   the last-ending event when the piece would exceed [`MAX_SAMPLES`]
/// - [`AudioError::Note`] wrapping the failure of a specific note
pub fn render_with_noise(
    events: &[NoteEvent],
    config: &RenderConfig,
    noise: &NoiseBuffer,
) -> AudioResult<RenderOutput> {
    config.validate()?;
    let excitation = Excitation::prepare(noise, config.excitation)?;
    render_prepared(events, config, noise, &excitation)
}

fn render_prepared(
    events: &[NoteEvent],
    config: &RenderConfig,
    noise: &NoiseBuffer,
    excitation: &Excitation,
) -> AudioResult<RenderOutput> {
    validate_events(events)?;

    let len_sec = config.samples_per_second();
    let (last, max_end) = events
        .iter()
        .enumerate()
        .fold((0, 0.0_f64), |(last, max_end), (i, e)| {
            if e.end_time > max_end {
                (i, e.end_time)
            } else {
                (last, max_end)
            }
        });
    // The guard alone always fits (checked by `validate`), so only a note
    // ending past zero can push the piece over the limit.
    let total_samples = checked_sample_count(((max_end + config.guard_seconds) * len_sec).ceil())
        .ok_or_else(|| AudioError::InvalidNoteEvent {
            index: last,
            event: events.get(last).map(ToString::to_string).unwrap_or_default(),
            reason: format!("piece would be longer than {} samples", MAX_SAMPLES),
        })?;

    debug!(
        notes = events.len(),
        total_samples,
        parallel = config.parallel,
        "rendering piece"
    );

    let mut master = MasterBuffer::new(total_samples);
    let mut warnings = Vec::new();

    for (batch_index, batch) in events.chunks(SYNTH_BATCH_SIZE).enumerate() {
        let base = batch_index * SYNTH_BATCH_SIZE;
        let synthesize = |(i, event): (usize, &NoteEvent)| {
            synthesize_note(base + i, event, config, noise, excitation)
        };

        let rendered: Vec<AudioResult<Option<Vec<f64>>>> = if config.parallel {
            batch.par_iter().enumerate().map(synthesize).collect()
        } else {
            batch.iter().enumerate().map(synthesize).collect()
        };

        for (i, (event, waveform)) in batch.iter().zip(rendered).enumerate() {
            let Some(waveform) = waveform? else {
                continue;
            };
            let index = base + i;
            let offset = (event.start_time * len_sec).round() as usize;
            let dropped_samples = master.add_at(offset, &waveform);
            if dropped_samples > 0 {
                warn!(note = index, dropped_samples, "note ran past the end of the piece");
                warnings.push(RenderWarning::TruncatedNote {
                    index,
                    dropped_samples,
                });
            }
        }
    }

    let peak = master.normalize_peak();
    if peak == 0.0 {
        warn!("rendered piece is silent, skipping normalization");
        warnings.push(RenderWarning::EmptyRender);
    }

    info!(
        notes = events.len(),
        samples = master.len(),
        peak,
        "rendered piece"
    );

    Ok(RenderOutput {
        samples: master.into_samples(),
        sample_rate: config.sampling_rate,
        channels: 1,
        warnings,
    })
}

/// Synthesizes one note, or `None` for zero-length notes.
fn synthesize_note(
    index: usize,
    event: &NoteEvent,
    config: &RenderConfig,
    noise: &NoiseBuffer,
    excitation: &Excitation,
) -> AudioResult<Option<Vec<f64>>> {
    let duration = event.duration() * config.delay_coef / config.tempo_coef;
    if duration <= 0.0 {
        debug!(note = index, "skipping zero-length note");
        return Ok(None);
    }

    let frequency = pitch_to_frequency(event.pitch as i32);
    KarplusString::new(frequency, duration)
        .with_update_rate(config.update_rate)
        .with_decay_rate(config.decay_rate)
        .with_excitation(config.excitation)
        .synthesize_with(noise, excitation, config.sampling_rate)
        .map(Some)
        .map_err(|e| AudioError::for_note(index, event.pitch, e))
}
