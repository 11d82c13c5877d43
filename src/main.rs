//! chord-engine - command-line front end
//!
//! ```text
//! chord-engine parse "G#m/7" "C:maj/3"
//! chord-engine transpose --semitones 2 --key Bb Gm7 C7 F
//! chord-engine simplify "Bbmaj7/D" "F#m7b5"
//! chord-engine align --chords chords.json --beats beats.json
//! ```
//!
//! Set `RUST_LOG=chord_engine=debug` to see degradation events.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chord_engine::error::read_source;
use chord_engine::{instrument_offset, ChordEngine, EngineConfig, Key};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for chord-engine
#[derive(Parser, Debug)]
#[command(name = "chord-engine")]
#[command(about = "Parse, transpose, simplify and beat-align chord labels")]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "CHORD_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the display label and parsed structure of each chord
    Parse {
        chords: Vec<String>,

        /// Print the parsed chords as JSON
        #[arg(long)]
        json: bool,
    },
    /// Transpose chord labels
    Transpose {
        /// Semitones to shift by
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        semitones: i32,

        /// Key to spell the result in
        #[arg(short, long)]
        key: Option<String>,

        /// Read the chart for a transposing instrument (C, Bb, Eb, F)
        #[arg(short, long)]
        instrument: Option<String>,

        chords: Vec<String>,
    },
    /// Reduce chord labels to major, minor, aug, dim or sus
    Simplify { chords: Vec<String> },
    /// Assign a chord label to every beat
    Align {
        /// JSON array of chord events
        #[arg(long)]
        chords: PathBuf,

        /// JSON array of beat times or beat events
        #[arg(long)]
        beats: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let config = EngineConfig::from_file(path)
        .with_context(|| format!("Error loading config '{}'", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chord_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let engine = ChordEngine::new(load_config(args.config.as_deref())?);

    match args.command {
        Command::Parse { chords, json } => {
            for text in &chords {
                let chord = engine.parse(text);
                if json {
                    println!("{}", serde_json::to_string(&chord)?);
                } else {
                    println!("{}\t{}", text, engine.format(&chord));
                }
            }
        }
        Command::Transpose {
            semitones,
            key,
            instrument,
            chords,
        } => {
            let key = key
                .as_deref()
                .map(|name| name.parse::<Key>())
                .transpose()
                .context("Invalid --key")?;
            let offset = match instrument.as_deref() {
                Some(name) => match instrument_offset(name) {
                    Some(offset) => offset,
                    None => bail!("Unknown instrument key '{}' (expected C, Bb, Eb or F)", name),
                },
                None => 0,
            };
            let labels: Vec<String> = chords
                .iter()
                .map(|text| engine.transpose(text, semitones + offset, key.as_ref()))
                .collect();
            println!("{}", labels.join(" "));
        }
        Command::Simplify { chords } => {
            let labels: Vec<String> = chords.iter().map(|text| engine.simplify(text)).collect();
            println!("{}", labels.join(" "));
        }
        Command::Align { chords, beats } => {
            let aligned = engine
                .align_json(&read_source(&chords)?, &read_source(&beats)?)
                .context("Alignment failed")?;
            info!("Aligned {} beats", aligned.len());
            println!("{}", serde_json::to_string(&aligned)?);
        }
    }

    Ok(())
}
