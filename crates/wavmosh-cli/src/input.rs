//! Loading files and configuration for commands.
//!
//! Failures come back as [`JsonError`] so `--json` runs can report a stable
//! code; human runs convert them into `anyhow` errors.

use std::fs;

use wavmosh_engine::wav::{split_canonical, WavParts};
use wavmosh_engine::MixEngine;
use wavmosh_spec::{MoshConfig, Preset};

use crate::commands::json_output::{error_codes, JsonError};

/// Reads a whole file.
pub fn read_file(path: &str) -> Result<Vec<u8>, JsonError> {
    fs::read(path).map_err(|e| {
        JsonError::new(error_codes::FILE_READ, format!("failed to read file: {}", e)).with_file(path)
    })
}

/// Splits a file at the canonical header boundary.
pub fn split_wav<'a>(file: &'a [u8], path: &str) -> Result<WavParts<'a>, JsonError> {
    split_canonical(file)
        .map_err(|e| JsonError::new(error_codes::INVALID_WAV, e.to_string()).with_file(path))
}

/// Loads a configuration table from JSON. Omitted fields take their defaults.
pub fn load_config(path: &str) -> Result<MoshConfig, JsonError> {
    let text = fs::read_to_string(path).map_err(|e| {
        JsonError::new(error_codes::FILE_READ, format!("failed to read config: {}", e))
            .with_file(path)
    })?;
    MoshConfig::from_json(&text).map_err(|e| {
        JsonError::new(error_codes::CONFIG_PARSE, format!("failed to parse config: {}", e))
            .with_file(path)
    })
}

/// Builds the engine from a config file if given, else from the preset.
pub fn load_engine(config_path: Option<&str>, preset: Preset) -> Result<MixEngine, JsonError> {
    match config_path {
        Some(path) => {
            let config = load_config(path)?;
            MixEngine::new(config).map_err(|e| {
                JsonError::new(error_codes::INVALID_CONFIG, e.to_string()).with_file(path)
            })
        }
        None => Ok(MixEngine::from_preset(preset)),
    }
}
