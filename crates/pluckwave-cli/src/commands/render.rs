//! Render command implementation
//!
//! Decodes a note file and renders it to a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use pluckwave_synth::{ExtractionMethod, PieceRenderer, RenderConfig, SampleFormat, WavResult};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use crate::input::{load_notes, InputKind};

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOverrides {
    pub seed: Option<u32>,
    pub tempo_coef: Option<f64>,
    pub delay_coef: Option<f64>,
    pub update_rate: Option<f64>,
    pub decay_rate: Option<f64>,
    pub excitation: Option<ExtractionMethod>,
    pub sequential: bool,
}

impl RenderOverrides {
    /// Applies every override that was given.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(tempo_coef) = self.tempo_coef {
            config.tempo_coef = tempo_coef;
        }
        if let Some(delay_coef) = self.delay_coef {
            config.delay_coef = delay_coef;
        }
        if let Some(update_rate) = self.update_rate {
            config.update_rate = update_rate;
        }
        if let Some(decay_rate) = self.decay_rate {
            config.decay_rate = decay_rate;
        }
        if let Some(excitation) = self.excitation {
            config.excitation = excitation;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}

/// Run the render command
///
/// # Arguments
/// * `input` - Note file (`.json` or Standard MIDI File)
/// * `output` - Destination WAV path
/// * `config_path` - Optional render configuration JSON
/// * `overrides` - Per-run configuration overrides
/// * `float` - Write 32-bit float samples instead of 16-bit PCM
/// * `decode_timeout` - Seconds to wait for the input to decode
pub fn run(
    input: &str,
    output: &str,
    config_path: Option<&str>,
    overrides: &RenderOverrides,
    float: bool,
    decode_timeout: f64,
) -> Result<ExitCode> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    overrides.apply(&mut config);

    let input_path = Path::new(input);
    println!(
        "{} {} ({})",
        "Rendering:".cyan().bold(),
        input,
        InputKind::from_path(input_path).as_str()
    );
    println!(
        "{} seed {}, tempo {}, delay {}, update {}, excitation {}",
        "Config:".dimmed(),
        config.seed,
        config.tempo_coef,
        config.delay_coef,
        config.update_rate,
        config.excitation
    );

    let notes = load_notes(input_path, decode_timeout)?;
    println!("{} {}", "Notes:".cyan().bold(), notes.len());

    let renderer = PieceRenderer::new(config).context("Invalid render configuration")?;
    let rendered = renderer
        .render(&notes)
        .with_context(|| format!("Failed to render {}", input))?;

    for warning in &rendered.warnings {
        println!("  {} [{}]: {}", "!".yellow(), warning.code(), warning);
    }

    let format = if float {
        SampleFormat::Float32
    } else {
        SampleFormat::Pcm16
    };
    let wav = WavResult::from_render(&rendered, format);
    wav.write_to(output)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(output, samples = wav.num_samples, "wrote WAV file");

    println!(
        "{} {} ({:.2}s, {} samples, {:?})",
        "Wrote:".green().bold(),
        output,
        wav.duration_seconds(),
        wav.num_samples,
        wav.sample_format
    );
    println!("{} {}", "PCM hash:".dimmed(), &wav.pcm_hash[..16]);
    println!(
        "{} {:.2}s",
        "Elapsed:".dimmed(),
        start.elapsed().as_secs_f64()
    );

    Ok(ExitCode::SUCCESS)
}
