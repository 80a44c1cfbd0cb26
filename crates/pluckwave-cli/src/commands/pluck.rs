//! Pluck command implementation
//!
//! Synthesizes a single string pluck, mostly for auditioning settings.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use pluckwave_synth::pitch::{frequency_to_period, frequency_to_pitch, pitch_to_frequency};
use pluckwave_synth::render::peak;
use pluckwave_synth::{KarplusString, NoiseBuffer, SampleFormat, WavResult};
use std::process::ExitCode;

/// What to pluck: a MIDI pitch or a raw frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PluckTarget {
    Pitch(u8),
    Frequency(f64),
}

impl PluckTarget {
    pub fn frequency(&self) -> f64 {
        match *self {
            PluckTarget::Pitch(pitch) => pitch_to_frequency(pitch as i32),
            PluckTarget::Frequency(freq) => freq,
        }
    }
}

/// Run the pluck command
///
/// The waveform is peak normalized, like a rendered piece.
pub fn run(
    target: PluckTarget,
    duration: f64,
    output: &str,
    config_path: Option<&str>,
    float: bool,
) -> Result<ExitCode> {
    let config = super::load_config(config_path)?;
    config.validate().context("Invalid render configuration")?;

    let frequency = target.frequency();
    let period = frequency_to_period(frequency, config.sampling_rate)?;
    if period > config.noise_capacity {
        bail!(
            "{:.2} Hz needs a {}-sample period but the noise buffer holds {}",
            frequency,
            period,
            config.noise_capacity
        );
    }

    println!(
        "{} {:.2} Hz (pitch {}, period {} samples)",
        "Plucking:".cyan().bold(),
        frequency,
        frequency_to_pitch(frequency),
        period
    );

    let noise = NoiseBuffer::generate(config.noise_capacity, config.seed)?;
    let mut samples = KarplusString::new(frequency, duration)
        .with_update_rate(config.update_rate)
        .with_decay_rate(config.decay_rate)
        .with_excitation(config.excitation)
        .synthesize(&noise, config.sampling_rate)?;

    let level = peak(&samples);
    if level > 0.0 {
        samples.iter_mut().for_each(|s| *s /= level);
    } else {
        println!("  {} pluck is silent", "!".yellow());
    }

    let format = if float {
        SampleFormat::Float32
    } else {
        SampleFormat::Pcm16
    };
    let wav = WavResult::from_mono(&samples, config.sampling_rate, format);
    wav.write_to(output)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    println!(
        "{} {} ({:.2}s, {} samples)",
        "Wrote:".green().bold(),
        output,
        wav.duration_seconds(),
        wav.num_samples
    );

    Ok(ExitCode::SUCCESS)
}
