//! pluckwave CLI - Command-line interface for plucked-string rendering
//!
//! This binary renders note files (MIDI or JSON) to WAV using Karplus-Strong
//! synthesis.

use clap::{ArgGroup, Parser, Subcommand};
use pluckwave_synth::ExtractionMethod;
use std::process::ExitCode;

use pluckwave_cli::commands;
use pluckwave_cli::commands::pluck::PluckTarget;
use pluckwave_cli::commands::render::RenderOverrides;
use pluckwave_cli::input::DEFAULT_DECODE_TIMEOUT_SECS;
use pluckwave_cli::logging;

/// pluckwave - Karplus-Strong plucked-string renderer
#[derive(Parser)]
#[command(name = "pluckwave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a note file (MIDI or JSON) to a WAV file
    Render {
        /// Input note file (.mid or .json)
        #[arg(short, long)]
        input: String,

        /// Output WAV file
        #[arg(short, long)]
        output: String,

        /// Render configuration JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Noise seed
        #[arg(long)]
        seed: Option<u32>,

        /// Tempo divisor (larger is faster)
        #[arg(long)]
        tempo_coef: Option<f64>,

        /// Note length multiplier
        #[arg(long)]
        delay_coef: Option<f64>,

        /// Karplus-Strong blend factor (0.0 to 1.0)
        #[arg(long)]
        update_rate: Option<f64>,

        /// Per-pass amplitude loss (0.0 to 1.0)
        #[arg(long)]
        decay_rate: Option<f64>,

        /// Excitation method (truncate, decimate, harmonic or harmonic:N)
        #[arg(long)]
        excitation: Option<ExtractionMethod>,

        /// Write 32-bit float samples instead of 16-bit PCM
        #[arg(long)]
        float: bool,

        /// Synthesize notes on the calling thread only
        #[arg(long)]
        sequential: bool,

        /// Seconds to wait for the input to decode
        #[arg(long, default_value_t = DEFAULT_DECODE_TIMEOUT_SECS)]
        decode_timeout: f64,
    },

    /// Synthesize a single pluck to a WAV file
    #[command(group(ArgGroup::new("target").required(true).args(["pitch", "frequency"])))]
    Pluck {
        /// MIDI pitch (0-127)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=127))]
        pitch: Option<u8>,

        /// Frequency in Hz
        #[arg(short, long)]
        frequency: Option<f64>,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Output WAV file
        #[arg(short, long)]
        output: String,

        /// Render configuration JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Write 32-bit float samples instead of 16-bit PCM
        #[arg(long)]
        float: bool,
    },

    /// Print the render configuration as JSON
    Config {
        /// Configuration file to load instead of the defaults
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            config,
            seed,
            tempo_coef,
            delay_coef,
            update_rate,
            decay_rate,
            excitation,
            float,
            sequential,
            decode_timeout,
        } => {
            let overrides = RenderOverrides {
                seed,
                tempo_coef,
                delay_coef,
                update_rate,
                decay_rate,
                excitation,
                sequential,
            };
            commands::render::run(
                &input,
                &output,
                config.as_deref(),
                &overrides,
                float,
                decode_timeout,
            )
        }
        Commands::Pluck {
            pitch,
            frequency,
            duration,
            output,
            config,
            float,
        } => {
            let target = match (pitch, frequency) {
                (Some(pitch), _) => PluckTarget::Pitch(pitch),
                (None, Some(freq)) => PluckTarget::Frequency(freq),
                (None, None) => unreachable!("clap requires --pitch or --frequency"),
            };
            commands::pluck::run(target, duration, &output, config.as_deref(), float)
        }
        Commands::Config { config } => commands::config::run(config.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
