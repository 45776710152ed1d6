//! Error and warning types for the mixing engine.

use serde::Serialize;
use thiserror::Error;
use wavmosh_spec::ConfigError;

/// Result type for engine operations.
pub type MoshResult<T> = Result<T, MoshError>;

/// Errors that stop a mixing call.
///
/// Most malformed input is handled by policy and reported as a
/// [`MoshWarning`] instead; these are the cases the engine refuses.
#[derive(Debug, Error)]
pub enum MoshError {
    /// Bit depth outside the supported set.
    #[error("unsupported bit depth: {bits} (supported: 16, 24)")]
    UnsupportedBitDepth {
        /// Declared bits per sample.
        bits: u16,
    },

    /// Buffer too short to hold a canonical header.
    #[error("header too short: need {expected} bytes, got {actual}")]
    HeaderTooShort {
        /// Required length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Missing RIFF/WAVE tags.
    #[error("not a RIFF/WAVE file")]
    NotRiffWave,

    /// Configuration table failed validation.
    #[error("invalid configuration: {}", format_config_errors(.0))]
    InvalidConfig(Vec<ConfigError>),
}

impl MoshError {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            MoshError::UnsupportedBitDepth { .. } => "MOSH_001",
            MoshError::HeaderTooShort { .. } => "MOSH_002",
            MoshError::NotRiffWave => "MOSH_003",
            MoshError::InvalidConfig(_) => "MOSH_004",
        }
    }
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A recoverable condition the engine handled by policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoshWarning {
    /// Declared bit depth unsupported; samples were read as 16-bit.
    UnsupportedBitDepth {
        /// Declared bits per sample.
        bits: u16,
    },
    /// Secondary shorter than a requested glitch window; reads were clamped.
    SourceTooShort {
        /// Requested window, in samples.
        requested: usize,
        /// Available secondary samples.
        available: usize,
    },
    /// Secondary input empty; glitch placement skipped.
    EmptySecondary,
    /// Unknown strategy name; smart mosh was used.
    StrategyFallback {
        /// Name as supplied.
        requested: String,
    },
}

impl MoshWarning {
    /// Stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            MoshWarning::UnsupportedBitDepth { .. } => "MOSH_W001",
            MoshWarning::SourceTooShort { .. } => "MOSH_W002",
            MoshWarning::EmptySecondary => "MOSH_W003",
            MoshWarning::StrategyFallback { .. } => "MOSH_W004",
        }
    }
}

impl std::fmt::Display for MoshWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoshWarning::UnsupportedBitDepth { bits } => {
                write!(f, "unsupported bit depth {}, treated as 16-bit", bits)
            }
            MoshWarning::SourceTooShort {
                requested,
                available,
            } => write!(
                f,
                "secondary has {} samples, glitch wanted {}; source reads clamped",
                available, requested
            ),
            MoshWarning::EmptySecondary => f.write_str("secondary audio is empty; nothing to mix"),
            MoshWarning::StrategyFallback { requested } => {
                write!(f, "unknown strategy '{}', using smart_mosh", requested)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            MoshError::UnsupportedBitDepth { bits: 8 },
            MoshError::HeaderTooShort {
                expected: 44,
                actual: 3,
            },
            MoshError::NotRiffWave,
            MoshError::InvalidConfig(vec![ConfigError::NoModeWeight]),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_invalid_config_lists_every_error() {
        let err = MoshError::InvalidConfig(vec![
            ConfigError::NoModeWeight,
            ConfigError::Zero {
                field: "chunk_mix.min_chunk".to_string(),
            },
        ]);
        let message = err.to_string();
        assert!(message.contains("mode_weights"));
        assert!(message.contains("chunk_mix.min_chunk"));
    }

    #[test]
    fn test_warning_display() {
        let warning = MoshWarning::UnsupportedBitDepth { bits: 32 };
        assert!(warning.to_string().contains("32"));
        assert_eq!(warning.code(), "MOSH_W001");
    }

    #[test]
    fn test_warning_serializes_with_kind() {
        let json = serde_json::to_string(&MoshWarning::SourceTooShort {
            requested: 100,
            available: 10,
        })
        .unwrap();
        assert!(json.contains("\"kind\":\"source_too_short\""));
        assert!(json.contains("\"requested\":100"));
    }
}
