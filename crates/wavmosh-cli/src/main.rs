//! Wavmosh CLI - Command-line interface for datamoshing WAV files
//!
//! This binary mixes two WAV files into a glitched one, inspects how the
//! engine reads a file, and prints or validates configuration tables.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use wavmosh_cli::commands;
use wavmosh_cli::commands::mosh::MoshOptions;
use wavmosh_cli::logging;
use wavmosh_spec::{Preset, SizeClass};

/// Wavmosh - PCM datamosh mixer
#[derive(Parser)]
#[command(name = "wavmosh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Glitch a primary WAV with audio from a secondary WAV
    Mosh {
        /// Path to the primary WAV (its header is kept)
        #[arg(short, long)]
        primary: String,

        /// Path to the secondary WAV (glitch source)
        #[arg(short, long)]
        secondary: String,

        /// Output path (default: datamoshed_<seed>.wav)
        #[arg(short, long)]
        output: Option<String>,

        /// Glitch intensity, 0-100 (values above 100 are clamped)
        #[arg(short, long, default_value_t = 50)]
        intensity: u32,

        /// Glitch size: small, medium, large (or 1, 2, 3)
        #[arg(long, default_value = "medium")]
        size: SizeClass,

        /// Strategy: smart_mosh, hex_swap, chunk_mix, byte_replace, header_corrupt
        #[arg(short, long, default_value = "smart_mosh")]
        method: String,

        /// Seed for reproducible output (default: random, reported after the run)
        #[arg(long)]
        seed: Option<u32>,

        /// JSON configuration table (overrides --preset)
        #[arg(short, long)]
        config: Option<String>,

        /// Built-in configuration preset: smart or block
        #[arg(long, default_value = "smart")]
        preset: Preset,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show how the engine reads a WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Number of interesting points to list
        #[arg(long, default_value_t = 5)]
        points: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print a preset configuration table, or validate one
    Config {
        /// Preset to print: smart or block
        #[arg(long, default_value = "smart", conflicts_with = "validate")]
        preset: Preset,

        /// Validate a configuration file instead of printing
        #[arg(long)]
        validate: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Mosh {
            primary,
            secondary,
            output,
            intensity,
            size,
            method,
            seed,
            config,
            preset,
            json,
        } => commands::mosh::run(&MoshOptions {
            primary,
            secondary,
            output,
            intensity,
            size,
            method,
            seed,
            config,
            preset,
            json,
        }),
        Commands::Inspect {
            input,
            points,
            json,
        } => commands::inspect::run(&input, points, json),
        Commands::Config { preset, validate } => match validate {
            Some(path) => commands::config::run_validate(&path),
            None => commands::config::run_print(preset),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
