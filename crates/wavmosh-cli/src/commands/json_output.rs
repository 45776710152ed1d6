//! JSON output types for machine-readable CLI output.
//!
//! Every `--json` report has the same envelope: a `success` flag, a list of
//! errors, a list of warnings, and a command-specific `result`.

use std::fmt;

use serde::{Deserialize, Serialize};
use wavmosh_engine::MoshWarning;

/// Error codes for CLI operations.
///
/// Format: CLI_XXX for CLI-level errors; engine and config codes pass through.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Input is not a canonical WAV file
    pub const INVALID_WAV: &str = "CLI_003";
    /// Configuration file could not be parsed
    pub const CONFIG_PARSE: &str = "CLI_004";
    /// Configuration failed validation
    pub const INVALID_CONFIG: &str = "CLI_005";
}

/// Warning codes for CLI operations.
pub mod warning_codes {
    /// Primary and secondary declare different bit depths
    pub const DEPTH_MISMATCH: &str = "CLI_W001";
    /// Output header's size fields do not describe the written payload
    pub const SIZE_MISMATCH: &str = "CLI_W002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "MOSH_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Adds a file path.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}: {}", file, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for JsonError {}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "MOSH_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&MoshWarning> for JsonWarning {
    fn from(warning: &MoshWarning) -> Self {
        Self::new(warning.code(), warning.to_string())
    }
}

/// Envelope shared by every `--json` report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Warnings raised
    pub warnings: Vec<JsonWarning>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
        }
    }

    /// Pretty JSON for stdout.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization_skips_missing_file() {
        let error = JsonError::new(error_codes::FILE_READ, "nope");
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"code":"CLI_001","message":"nope"}"#);

        let error = error.with_file("a.wav");
        assert!(serde_json::to_string(&error).unwrap().contains("\"file\":\"a.wav\""));
        assert_eq!(error.to_string(), "a.wav: nope");
    }

    #[test]
    fn test_warning_from_engine() {
        let warning = JsonWarning::from(&MoshWarning::UnsupportedBitDepth { bits: 8 });
        assert_eq!(warning.code, "MOSH_W001");
        assert!(warning.message.contains('8'));
    }

    #[test]
    fn test_failure_envelope() {
        let output: CommandOutput<u32> =
            CommandOutput::failure(vec![JsonError::new(error_codes::INVALID_WAV, "bad")]);
        let value: serde_json::Value = serde_json::from_str(&output.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["errors"][0]["code"], "CLI_003");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let output = CommandOutput::success(7u32, vec![JsonWarning::new("X", "y")]);
        let value: serde_json::Value = serde_json::from_str(&output.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["result"], 7);
        assert_eq!(value["warnings"][0]["code"], "X");
    }
}
