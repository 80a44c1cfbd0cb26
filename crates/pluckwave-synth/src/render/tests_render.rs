//! Tests for piece rendering.

use super::*;
use crate::period::ExtractionMethod;

fn plain_config() -> RenderConfig {
    RenderConfig {
        tempo_coef: 1.0,
        delay_coef: 1.0,
        ..RenderConfig::default()
    }
}

#[test]
fn test_single_note_offset_and_peak() {
    let renderer = PieceRenderer::new(plain_config()).unwrap();
    let output = renderer
        .render(&[NoteEvent::new(69, 0.5, 1.0)])
        .unwrap();

    assert_eq!(output.sample_rate, 44100);
    assert_eq!(output.channels, 1);
    assert!(output.warnings.is_empty());
    // Nothing before the onset.
    assert!(output.samples[..22050].iter().all(|&s| s == 0.0));
    assert!(output.samples[22050..44100].iter().any(|&s| s != 0.0));
    assert!((peak(&output.samples) - 1.0).abs() < 1e-12);
}

#[test]
fn test_invalid_event_is_named() {
    let renderer = PieceRenderer::new(plain_config()).unwrap();
    let events = [NoteEvent::new(60, 0.0, 1.0), NoteEvent::new(60, 2.0, 1.0)];

    match renderer.render(&events) {
        Err(AudioError::InvalidNoteEvent { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected InvalidNoteEvent, got {:?}", other),
    }
}

#[test]
fn test_note_failure_is_attributed() {
    let renderer = PieceRenderer::new(plain_config()).unwrap();
    // MIDI 0 (~8.2 Hz) needs a period longer than the 4096-sample buffer.
    let events = [NoteEvent::new(60, 0.0, 1.0), NoteEvent::new(0, 0.0, 1.0)];

    match renderer.render(&events) {
        Err(AudioError::Note {
            index,
            pitch,
            source,
        }) => {
            assert_eq!(index, 1);
            assert_eq!(pitch, 0);
            assert!(matches!(*source, AudioError::InvalidPeriodLength { .. }));
        }
        other => panic!("expected Note error, got {:?}", other),
    }
}

#[test]
fn test_zero_length_note_is_skipped() {
    let renderer = PieceRenderer::new(plain_config()).unwrap();
    let output = renderer.render(&[NoteEvent::new(60, 1.0, 1.0)]).unwrap();
    assert!(output.is_silent());
    assert_eq!(output.warnings, vec![RenderWarning::EmptyRender]);
}

#[test]
fn test_truncated_note_warning() {
    let config = RenderConfig {
        delay_coef: 2.0,
        guard_seconds: 0.0,
        ..plain_config()
    };
    let output = PieceRenderer::new(config)
        .unwrap()
        .render(&[NoteEvent::new(60, 0.0, 1.0)])
        .unwrap();

    assert_eq!(output.samples.len(), 44100);
    assert_eq!(
        output.warnings,
        vec![RenderWarning::TruncatedNote {
            index: 0,
            dropped_samples: 44100
        }]
    );
    assert_eq!(output.warnings[0].code(), "W002");
}

#[test]
fn test_parallel_matches_sequential() {
    let events: Vec<NoteEvent> = (0..150)
        .map(|i| {
            let start = i as f64 * 0.05;
            NoteEvent::new(40 + (i % 40) as u8, start, start + 0.3)
        })
        .collect();

    let parallel = PieceRenderer::new(plain_config()).unwrap();
    let sequential = PieceRenderer::new(RenderConfig {
        parallel: false,
        ..plain_config()
    })
    .unwrap();

    let a = parallel.render(&events).unwrap();
    let b = sequential.render(&events).unwrap();
    assert_eq!(a.samples, b.samples);
}

#[test]
fn test_invalid_config_rejected() {
    let config = RenderConfig {
        tempo_coef: 0.0,
        ..RenderConfig::default()
    };
    assert!(matches!(
        PieceRenderer::new(config),
        Err(AudioError::InvalidParameter { .. })
    ));
}

#[test]
fn test_render_output_duration() {
    let output = RenderOutput {
        samples: vec![0.0; 22050],
        sample_rate: 44100,
        channels: 1,
        warnings: Vec::new(),
    };
    assert_eq!(output.duration_seconds(), 0.5);
    assert!(!output.is_silent());
}

#[test]
fn test_overlong_piece_is_rejected() {
    let renderer = PieceRenderer::new(plain_config()).unwrap();

    match renderer.render(&[NoteEvent::new(60, 0.0, 1e15)]) {
        Err(AudioError::InvalidNoteEvent { index, reason, .. }) => {
            assert_eq!(index, 0);
            assert!(reason.contains("samples"));
        }
        other => panic!("expected InvalidNoteEvent, got {:?}", other.map(|o| o.samples.len())),
    }

    // The last-ending note is the one named.
    let events = [
        NoteEvent::new(60, 0.0, 1.0),
        NoteEvent::new(62, 0.5, 1e12),
        NoteEvent::new(64, 1.0, 2.0),
    ];
    match renderer.render(&events) {
        Err(AudioError::InvalidNoteEvent { index, event, .. }) => {
            assert_eq!(index, 1);
            assert!(event.starts_with("pitch 62"));
        }
        other => panic!("expected InvalidNoteEvent, got {:?}", other.map(|o| o.samples.len())),
    }
}

#[test]
fn test_overlong_note_is_attributed() {
    // The piece fits, but stretching the note past the sample limit does not.
    let config = RenderConfig {
        delay_coef: 1e12,
        ..plain_config()
    };
    let renderer = PieceRenderer::new(config).unwrap();

    match renderer.render(&[NoteEvent::new(60, 0.0, 1.0)]) {
        Err(AudioError::Note { index, source, .. }) => {
            assert_eq!(index, 0);
            assert!(matches!(*source, AudioError::InvalidDuration { .. }));
        }
        other => panic!("expected Note error, got {:?}", other.map(|o| o.samples.len())),
    }
}

#[test]
fn test_with_noise_matches_generated_noise() {
    let config = plain_config();
    let noise = NoiseBuffer::generate(config.noise_capacity, config.seed).unwrap();
    let supplied = PieceRenderer::with_noise(config.clone(), noise).unwrap();
    let generated = PieceRenderer::new(config.clone()).unwrap();

    assert_eq!(supplied.noise(), generated.noise());
    assert_eq!(supplied.config(), &config);
    assert_eq!(supplied.excitation(), generated.excitation());

    let events = [NoteEvent::new(57, 0.0, 0.4), NoteEvent::new(64, 0.2, 0.6)];
    assert_eq!(
        supplied.render(&events).unwrap().samples,
        generated.render(&events).unwrap().samples
    );
}

#[test]
fn test_with_noise_rejects_invalid_config() {
    let noise = NoiseBuffer::generate(64, 1).unwrap();
    let config = RenderConfig {
        update_rate: 2.0,
        ..plain_config()
    };
    assert!(matches!(
        PieceRenderer::with_noise(config, noise),
        Err(AudioError::InvalidParameter { .. })
    ));
}

#[test]
fn test_harmonic_excitation_prepared_once() {
    let config = RenderConfig {
        excitation: ExtractionMethod::Harmonic { harmonics: 16 },
        ..plain_config()
    };
    let renderer = PieceRenderer::new(config.clone()).unwrap();
    assert_eq!(renderer.excitation().method(), config.excitation);

    let events: Vec<NoteEvent> = (0..6)
        .map(|i| NoteEvent::new(48 + 5 * i as u8, i as f64 * 0.1, i as f64 * 0.1 + 0.3))
        .collect();
    let cached = renderer.render(&events).unwrap();
    let fresh = render_with_noise(&events, &config, renderer.noise()).unwrap();
    assert_eq!(cached.samples, fresh.samples);
    assert!(!cached.is_silent());
}
