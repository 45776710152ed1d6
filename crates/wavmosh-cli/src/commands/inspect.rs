//! Inspect command implementation
//!
//! Reports how the engine would read a WAV file: declared format, payload
//! size, and the highest-energy windows used for glitch placement.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::process::ExitCode;
use wavmosh_engine::energy::score_windows;
use wavmosh_engine::header::HEADER_LEN;
use wavmosh_engine::resolve_bit_depth;
use wavmosh_engine::wav::pcm_hash;

use crate::input::{read_file, split_wav};

use super::json_output::{error_codes, CommandOutput, JsonError, JsonWarning};

/// A scored window in the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointReport {
    /// Byte offset into the payload
    pub position: usize,
    /// Window energy score
    pub energy: u64,
}

/// Inspection result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectReport {
    /// File path
    pub file: String,
    /// Whole file length in bytes
    pub file_bytes: usize,
    /// Whether the data chunk starts right after a 44-byte header
    pub canonical: bool,
    /// Declared channel count
    pub channels: u16,
    /// Declared sample rate in Hz
    pub sample_rate: u32,
    /// Declared bits per sample
    pub bits_per_sample: u16,
    /// Depth the engine would decode as
    pub decode_bits: u16,
    /// Payload length in bytes
    pub payload_bytes: usize,
    /// Whole samples in the payload at the decode depth
    pub sample_count: usize,
    /// Payload duration in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the payload
    pub pcm_hash: String,
    /// Highest-energy windows, best first
    pub interesting_points: Vec<PointReport>,
}

/// Run the inspect command
///
/// # Arguments
/// * `path` - WAV file to inspect
/// * `points` - Number of interesting points to report
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(path: &str, points: usize, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(path, points)
    } else {
        run_human(path, points)
    }
}

fn run_human(path: &str, points: usize) -> Result<ExitCode> {
    let (report, warnings) = inspect(path, points)?;

    println!("{} {}", "Inspecting:".cyan().bold(), report.file);
    println!(
        "  {} {} ch, {} Hz, {}-bit",
        "Format:".dimmed(),
        report.channels,
        report.sample_rate,
        report.bits_per_sample
    );
    if !report.canonical {
        println!(
            "  {} data chunk does not start at byte {}; extra chunks will be treated as audio",
            "Layout:".dimmed(),
            HEADER_LEN
        );
    }
    println!(
        "  {} {} bytes, {} samples, {:.3} s",
        "Payload:".dimmed(),
        report.payload_bytes,
        report.sample_count,
        report.duration_seconds
    );
    println!("  {} {}", "PCM hash:".dimmed(), &report.pcm_hash[..16]);

    if !report.interesting_points.is_empty() {
        println!("\n{}", "Interesting points:".cyan().bold());
        for point in &report.interesting_points {
            println!(
                "  {:>10} {}",
                point.position,
                format!("energy {}", point.energy).dimmed()
            );
        }
    }

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

fn run_json(path: &str, points: usize) -> Result<ExitCode> {
    match inspect(path, points) {
        Ok((report, warnings)) => {
            println!("{}", CommandOutput::success(report, warnings).to_json_pretty()?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let output = CommandOutput::<InspectReport>::failure(vec![error]);
            println!("{}", output.to_json_pretty()?);
            Ok(ExitCode::from(1))
        }
    }
}

/// Reads and analyzes one file.
pub fn inspect(path: &str, points: usize) -> Result<(InspectReport, Vec<JsonWarning>), JsonError> {
    let file = read_file(path)?;
    let parts = split_wav(&file, path)?;
    let format = parts.format().ok_or_else(|| {
        JsonError::new(error_codes::INVALID_WAV, "header is missing format fields").with_file(path)
    })?;

    let (depth, depth_warning) = resolve_bit_depth(format.bits_per_sample);
    let warnings: Vec<JsonWarning> = depth_warning.iter().map(JsonWarning::from).collect();

    let interesting_points = score_windows(parts.payload, points)
        .into_iter()
        .take(points)
        .map(|p| PointReport {
            position: p.position,
            energy: p.energy,
        })
        .collect();

    let report = InspectReport {
        file: path.to_string(),
        file_bytes: file.len(),
        canonical: parts.is_canonical(&file),
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bits_per_sample,
        decode_bits: depth.bits(),
        payload_bytes: parts.payload.len(),
        sample_count: depth.codec().sample_count(parts.payload.len()),
        duration_seconds: format.duration_seconds(parts.payload.len()),
        pcm_hash: pcm_hash(parts.payload),
        interesting_points,
    };
    Ok((report, warnings))
}
