//! Standard MIDI File decoding.
//!
//! Note-on/note-off pairs from every track are turned into [`NoteEvent`]s
//! with absolute times in seconds. Everything else in the file (controllers,
//! program changes, velocities, sysex) is ignored.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, Track, TrackEventKind};
use pluckwave_synth::NoteEvent;
use tracing::debug;

use crate::error::{MidiError, Result};

/// Tempo assumed until the first tempo event (120 BPM).
pub const DEFAULT_TEMPO_US_PER_QUARTER: u32 = 500_000;

/// Load a MIDI file from disk and decode its notes.
pub fn load_notes(path: impl AsRef<Path>) -> Result<Vec<NoteEvent>> {
    let data = std::fs::read(path.as_ref())?;
    parse_notes(&data)
}

/// Decode the notes of an in-memory MIDI file.
///
/// Notes are sorted by start time, then by pitch.
pub fn parse_notes(data: &[u8]) -> Result<Vec<NoteEvent>> {
    let smf = Smf::parse(data)?;
    let clock = TickClock::new(&smf)?;

    debug!(
        tracks = smf.tracks.len(),
        format = ?smf.header.format,
        "parsing MIDI file"
    );

    let mut notes = Vec::new();
    for (index, track) in smf.tracks.iter().enumerate() {
        let spans = pair_notes(track);
        debug!(track = index, notes = spans.len(), "decoded track");
        notes.extend(spans.into_iter().map(|span| {
            NoteEvent::new(
                span.key,
                clock.seconds_at(span.start_tick),
                clock.seconds_at(span.end_tick),
            )
        }));
    }

    notes.sort_by(|a, b| {
        a.start_time
            .total_cmp(&b.start_time)
            .then(a.pitch.cmp(&b.pitch))
    });
    Ok(notes)
}

/// A paired note in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NoteSpan {
    key: u8,
    start_tick: u64,
    end_tick: u64,
}

/// Pairs note-ons with note-offs in one track.
///
/// A note-off closes the earliest open note with the same channel and key.
/// Notes still open when the track ends are closed at its last tick.
fn pair_notes(track: &Track) -> Vec<NoteSpan> {
    let mut open: HashMap<(u8, u8), VecDeque<u64>> = HashMap::new();
    let mut spans = Vec::new();
    let mut tick = 0u64;

    for event in track.iter() {
        tick += event.delta.as_int() as u64;

        let TrackEventKind::Midi { channel, message } = &event.kind else {
            continue;
        };
        let (key, is_on) = match message {
            MidiMessage::NoteOn { key, vel } => (key.as_int(), vel.as_int() > 0),
            MidiMessage::NoteOff { key, .. } => (key.as_int(), false),
            _ => continue,
        };

        let slot = (channel.as_int(), key);
        if is_on {
            open.entry(slot).or_default().push_back(tick);
        } else if let Some(start_tick) = open.get_mut(&slot).and_then(VecDeque::pop_front) {
            spans.push(NoteSpan {
                key,
                start_tick,
                end_tick: tick,
            });
        } else {
            debug!(channel = slot.0, key, tick, "note-off without matching note-on");
        }
    }

    for ((_, key), starts) in open {
        for start_tick in starts {
            spans.push(NoteSpan {
                key,
                start_tick,
                end_tick: tick,
            });
        }
    }

    spans
}

/// Converts absolute ticks to seconds.
#[derive(Debug, Clone)]
enum TickClock {
    /// Ticks per quarter note with a tempo map merged from all tracks.
    Metrical {
        ticks_per_beat: f64,
        segments: Vec<TempoSegment>,
    },
    /// Fixed ticks per second.
    Timecode { ticks_per_second: f64 },
}

/// A stretch of constant tempo starting at `tick`.
#[derive(Debug, Clone, Copy)]
struct TempoSegment {
    tick: u64,
    seconds: f64,
    us_per_quarter: u32,
}

impl TickClock {
    fn new(smf: &Smf) -> Result<Self> {
        match smf.header.timing {
            Timing::Metrical(tpb) => {
                let ticks_per_beat = tpb.as_int();
                if ticks_per_beat == 0 {
                    return Err(MidiError::InvalidTiming(
                        "zero ticks per quarter note".to_string(),
                    ));
                }
                Ok(TickClock::Metrical {
                    ticks_per_beat: ticks_per_beat as f64,
                    segments: tempo_map(&smf.tracks, ticks_per_beat as f64),
                })
            }
            Timing::Timecode(fps, subframes) => {
                let ticks_per_second = fps.as_f32() as f64 * subframes as f64;
                if ticks_per_second <= 0.0 {
                    return Err(MidiError::InvalidTiming(format!(
                        "{} fps with {} subframes",
                        fps.as_f32(),
                        subframes
                    )));
                }
                Ok(TickClock::Timecode { ticks_per_second })
            }
        }
    }

    fn seconds_at(&self, tick: u64) -> f64 {
        match self {
            TickClock::Metrical {
                ticks_per_beat,
                segments,
            } => {
                // segments[0] starts at tick 0, so the index never underflows.
                let index = segments.partition_point(|s| s.tick <= tick).saturating_sub(1);
                let segment = segments[index];
                segment.seconds
                    + segment_seconds(tick - segment.tick, segment.us_per_quarter, *ticks_per_beat)
            }
            TickClock::Timecode { ticks_per_second } => tick as f64 / ticks_per_second,
        }
    }
}

fn segment_seconds(ticks: u64, us_per_quarter: u32, ticks_per_beat: f64) -> f64 {
    ticks as f64 * us_per_quarter as f64 / (ticks_per_beat * 1_000_000.0)
}

/// Builds the tempo map from the tempo events of all tracks.
fn tempo_map(tracks: &[Track], ticks_per_beat: f64) -> Vec<TempoSegment> {
    let mut changes: Vec<(u64, u32)> = Vec::new();
    for track in tracks {
        let mut tick = 0u64;
        for event in track.iter() {
            tick += event.delta.as_int() as u64;
            if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = &event.kind {
                changes.push((tick, tempo.as_int()));
            }
        }
    }
    changes.sort_by_key(|&(tick, _)| tick);

    let mut segments = vec![TempoSegment {
        tick: 0,
        seconds: 0.0,
        us_per_quarter: DEFAULT_TEMPO_US_PER_QUARTER,
    }];
    for (tick, us_per_quarter) in changes {
        let Some(&last) = segments.last() else {
            continue;
        };
        let seconds =
            last.seconds + segment_seconds(tick - last.tick, last.us_per_quarter, ticks_per_beat);
        segments.push(TempoSegment {
            tick,
            seconds,
            us_per_quarter,
        });
        debug!(tick, bpm = 60_000_000.0 / us_per_quarter as f64, "tempo change");
    }
    segments
}
