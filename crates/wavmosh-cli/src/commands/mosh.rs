//! Mosh command implementation
//!
//! Mixes a secondary WAV into a primary one and writes the primary's header
//! followed by the glitched payload.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;
use tracing::{info, warn};
use wavmosh_engine::{MoshOutput, MoshRequest};
use wavmosh_spec::{GlitchParameters, Preset, SizeClass, Strategy};

use crate::input::{load_engine, read_file, split_wav};

use super::json_output::{error_codes, warning_codes, CommandOutput, JsonError, JsonWarning};

/// Options for one mosh run.
#[derive(Debug, Clone)]
pub struct MoshOptions {
    /// Primary WAV path.
    pub primary: String,
    /// Secondary WAV path.
    pub secondary: String,
    /// Output path; `datamoshed_<seed>.wav` when omitted.
    pub output: Option<String>,
    /// Intensity, clamped to 0..=100.
    pub intensity: u32,
    /// Glitch size class.
    pub size: SizeClass,
    /// Strategy name; unknown names fall back to smart mosh.
    pub method: String,
    /// Seed; drawn at random when omitted.
    pub seed: Option<u32>,
    /// JSON configuration file, overriding the preset.
    pub config: Option<String>,
    /// Built-in configuration preset.
    pub preset: Preset,
    /// Emit a JSON report instead of colored text.
    pub json: bool,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoshReport {
    /// Primary WAV path
    pub primary: String,
    /// Secondary WAV path
    pub secondary: String,
    /// Written file path
    pub output: String,
    /// Strategy that ran
    pub strategy: String,
    /// Method name as supplied
    pub requested_method: String,
    /// Seed used (pass back with --seed to reproduce)
    pub seed: u32,
    /// Effective intensity
    pub intensity: u8,
    /// Glitch size class
    pub size: String,
    /// Depth the payloads were decoded as
    pub bit_depth: u16,
    /// Depth declared by the primary header
    pub primary_bit_depth: u16,
    /// Depth declared by the secondary header
    pub secondary_bit_depth: u16,
    /// Glitch events applied
    pub glitches_applied: usize,
    /// Payload length in bytes
    pub payload_bytes: usize,
    /// BLAKE3 hash of the payload
    pub pcm_hash: String,
}

/// Default output file name for a seed.
pub fn default_output_name(seed: u32) -> String {
    format!("datamoshed_{}.wav", seed)
}

/// Run the mosh command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(options: &MoshOptions) -> Result<ExitCode> {
    if options.json {
        run_json(options)
    } else {
        run_human(options)
    }
}

/// Run mosh with human-readable (colored) output
fn run_human(options: &MoshOptions) -> Result<ExitCode> {
    let (report, warnings) = execute(options)?;

    println!("{}", "Datamosh complete".green().bold());
    println!("  {} {}", "Primary:".dimmed(), report.primary);
    println!("  {} {}", "Secondary:".dimmed(), report.secondary);
    println!("  {} {}", "Output:".dimmed(), report.output.cyan());
    println!("  {} {}", "Strategy:".dimmed(), report.strategy);
    println!(
        "  {} {} ({})",
        "Intensity:".dimmed(),
        report.intensity,
        report.size
    );
    println!(
        "  {} {}-bit (primary {}, secondary {})",
        "Bit depth:".dimmed(),
        report.bit_depth,
        report.primary_bit_depth,
        report.secondary_bit_depth
    );
    println!("  {} {}", "Glitches:".dimmed(), report.glitches_applied);
    println!("  {} {}", "PCM hash:".dimmed(), &report.pcm_hash[..16]);
    println!("  {} {}", "Seed:".dimmed(), report.seed.to_string().yellow());

    for warning in &warnings {
        println!(
            "{} [{}] {}",
            "warning:".yellow().bold(),
            warning.code,
            warning.message
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Run mosh with machine-readable JSON output
fn run_json(options: &MoshOptions) -> Result<ExitCode> {
    match execute(options) {
        Ok((report, warnings)) => {
            let output = CommandOutput::success(report, warnings);
            println!("{}", output.to_json_pretty()?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let output = CommandOutput::<MoshReport>::failure(vec![error]);
            println!("{}", output.to_json_pretty()?);
            Ok(ExitCode::from(1))
        }
    }
}

/// Runs the engine and writes the output file.
pub fn execute(options: &MoshOptions) -> Result<(MoshReport, Vec<JsonWarning>), JsonError> {
    let engine = load_engine(options.config.as_deref(), options.preset)?;

    let primary_file = read_file(&options.primary)?;
    let secondary_file = read_file(&options.secondary)?;
    let primary = split_wav(&primary_file, &options.primary)?;
    let secondary = split_wav(&secondary_file, &options.secondary)?;

    let primary_bits = primary.bit_depth().unwrap_or(16);
    let secondary_bits = secondary.bit_depth().unwrap_or(16);
    let mut warnings = Vec::new();
    if primary_bits != secondary_bits {
        warn!(
            primary = primary_bits,
            secondary = secondary_bits,
            "bit depths differ, decoding both as the primary's"
        );
        warnings.push(JsonWarning::new(
            warning_codes::DEPTH_MISMATCH,
            format!(
                "primary is {}-bit but secondary is {}-bit; both decoded as {}-bit",
                primary_bits, secondary_bits, primary_bits
            ),
        ));
    }

    let seed = options.seed.unwrap_or_else(rand::random::<u32>);
    let params = GlitchParameters::new(options.intensity)
        .with_size(options.size)
        .with_seed(seed);
    let request = MoshRequest {
        header: primary.header,
        primary: primary.payload,
        secondary: secondary.payload,
        bit_depth: primary_bits,
    };

    let output = engine.run_named(&request, &params, &options.method);
    warnings.extend(output.warnings.iter().map(JsonWarning::from));

    // Header corruption may hit the size fields on purpose.
    if output.strategy != Strategy::HeaderCorrupt && !output.declared_sizes_match() {
        warn!(
            payload = output.payload.len(),
            "output header size fields do not match the payload"
        );
        warnings.push(JsonWarning::new(
            warning_codes::SIZE_MISMATCH,
            format!(
                "primary header is not canonical; its size fields do not describe the {}-byte payload",
                output.payload.len()
            ),
        ));
    }

    let out_path = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(seed));
    write_output(&out_path, &output).map_err(|e| {
        JsonError::new(error_codes::FILE_WRITE, format!("failed to write output: {}", e))
            .with_file(&out_path)
    })?;

    info!(
        output = %out_path,
        strategy = %output.strategy,
        seed,
        glitches = output.glitches_applied,
        "wrote datamoshed file"
    );

    let report = MoshReport {
        primary: options.primary.clone(),
        secondary: options.secondary.clone(),
        output: out_path,
        strategy: output.strategy.to_string(),
        requested_method: options.method.clone(),
        seed,
        intensity: params.intensity(),
        size: options.size.to_string(),
        bit_depth: output.bit_depth.bits(),
        primary_bit_depth: primary_bits,
        secondary_bit_depth: secondary_bits,
        glitches_applied: output.glitches_applied,
        payload_bytes: output.payload.len(),
        pcm_hash: output.pcm_hash,
    };
    Ok((report, warnings))
}

fn write_output(path: &str, output: &MoshOutput) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    output.write_to(&mut writer)?;
    writer.flush()
}
