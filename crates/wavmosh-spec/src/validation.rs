//! Range checks over the configuration table.

use thiserror::Error;

use crate::config::{ChunkMixConfig, HeaderCorruptConfig, MoshConfig, SmartMoshConfig};

/// Result of validating a configuration table.
pub type ConfigResult = Result<(), Vec<ConfigError>>;

/// A single violated configuration constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A fraction field lies outside [0, 1].
    #[error("'{field}' must be within [0, 1], got {value}")]
    NotUnitInterval {
        /// Dotted field path.
        field: String,
        /// Offending value.
        value: f64,
    },

    /// A weight or gain is negative or not finite.
    #[error("'{field}' must be finite and non-negative, got {value}")]
    Negative {
        /// Dotted field path.
        field: String,
        /// Offending value.
        value: f64,
    },

    /// A length range is empty or inverted.
    #[error("'{field}' has an invalid length range: min {min} > max {max} or max is zero")]
    InvalidRange {
        /// Dotted field path.
        field: String,
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },

    /// All sub-mode weights are zero.
    #[error("'smart_mosh.mode_weights' must have at least one positive weight")]
    NoModeWeight,

    /// A size that must be positive is zero.
    #[error("'{field}' must be greater than zero")]
    Zero {
        /// Dotted field path.
        field: String,
    },

    /// The protected header prefix does not fit in the header.
    #[error("'header_corrupt.protected_prefix' ({prefix}) exceeds header length ({header_length})")]
    PrefixTooLong {
        /// Protected prefix length.
        prefix: usize,
        /// Header length.
        header_length: usize,
    },
}

impl ConfigError {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NotUnitInterval { .. } => "CFG_001",
            ConfigError::Negative { .. } => "CFG_002",
            ConfigError::InvalidRange { .. } => "CFG_003",
            ConfigError::NoModeWeight => "CFG_004",
            ConfigError::Zero { .. } => "CFG_005",
            ConfigError::PrefixTooLong { .. } => "CFG_006",
        }
    }
}

impl MoshConfig {
    /// Validates every field, collecting all violations.
    pub fn validate(&self) -> ConfigResult {
        let mut errors = Vec::new();
        validate_smart_mosh(&self.smart_mosh, &mut errors);
        validate_chunk_mix(&self.chunk_mix, &mut errors);
        validate_header_corrupt(&self.header_corrupt, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_smart_mosh(config: &SmartMoshConfig, errors: &mut Vec<ConfigError>) {
    for (size, profile) in config.sizes.iter() {
        if profile.max_length == 0 || profile.min_length > profile.max_length {
            errors.push(ConfigError::InvalidRange {
                field: format!("smart_mosh.sizes.{}", size),
                min: profile.min_length,
                max: profile.max_length,
            });
        }
    }

    unit_interval("smart_mosh.fade_fraction", config.fade_fraction, errors);
    unit_interval("smart_mosh.clip_threshold", config.clip_threshold, errors);
    unit_interval("smart_mosh.clip_damping", config.clip_damping, errors);
    unit_interval(
        "smart_mosh.interesting_point_bias",
        config.interesting_point_bias,
        errors,
    );
    non_negative("smart_mosh.volume_reduction", config.volume_reduction, errors);

    let weights = &config.mode_weights;
    let before = errors.len();
    non_negative("smart_mosh.mode_weights.direct", weights.direct, errors);
    non_negative("smart_mosh.mode_weights.blend", weights.blend, errors);
    non_negative("smart_mosh.mode_weights.bit_flip", weights.bit_flip, errors);
    non_negative("smart_mosh.mode_weights.echo", weights.echo, errors);
    if errors.len() == before && weights.total() <= 0.0 {
        errors.push(ConfigError::NoModeWeight);
    }
}

fn validate_chunk_mix(config: &ChunkMixConfig, errors: &mut Vec<ConfigError>) {
    for (field, value) in [
        ("chunk_mix.small_chunk", config.small_chunk),
        ("chunk_mix.medium_chunk", config.medium_chunk),
        ("chunk_mix.large_chunk", config.large_chunk),
        ("chunk_mix.min_chunk", config.min_chunk),
    ] {
        if value == 0 {
            errors.push(ConfigError::Zero {
                field: field.to_string(),
            });
        }
    }
    unit_interval("chunk_mix.intensity_shrink", config.intensity_shrink, errors);
}

fn validate_header_corrupt(config: &HeaderCorruptConfig, errors: &mut Vec<ConfigError>) {
    if config.protected_prefix > config.header_length {
        errors.push(ConfigError::PrefixTooLong {
            prefix: config.protected_prefix,
            header_length: config.header_length,
        });
    }
}

fn unit_interval(field: &str, value: f64, errors: &mut Vec<ConfigError>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::NotUnitInterval {
            field: field.to_string(),
            value,
        });
    }
}

fn non_negative(field: &str, value: f64, errors: &mut Vec<ConfigError>) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ConfigError::Negative {
            field: field.to_string(),
            value,
        });
    }
}
