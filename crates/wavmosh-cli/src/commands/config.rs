//! Config command implementation
//!
//! Prints a preset's configuration table as JSON (a starting point for
//! `mosh --config`) or validates an edited table.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use wavmosh_spec::{MoshConfig, Preset};

use crate::input::load_config;

/// Print a preset as pretty JSON.
pub fn run_print(preset: Preset) -> Result<ExitCode> {
    let config = MoshConfig::from_preset(preset);
    let json = config
        .to_json_pretty()
        .with_context(|| format!("Failed to serialize preset {}", preset))?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

/// Validate a configuration file.
///
/// # Returns
/// Exit code: 0 if valid, 1 if any constraint is violated
pub fn run_validate(path: &str) -> Result<ExitCode> {
    let config = load_config(path)?;

    match config.validate() {
        Ok(()) => {
            println!("{} {}", "Valid:".green().bold(), path);
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            println!("{} {}", "Invalid:".red().bold(), path);
            for error in &errors {
                println!("  {} {}", format!("[{}]", error.code()).red(), error);
            }
            Ok(ExitCode::from(1))
        }
    }
}
