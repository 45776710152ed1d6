//! Glitch parameters supplied by the control layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest accepted intensity. Larger values are clamped.
pub const MAX_INTENSITY: u8 = 100;

/// The five mixing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Sample-aware glitch blocks with raised-cosine fades and soft clipping.
    #[default]
    SmartMosh,
    /// Per-byte probabilistic substitution.
    HexSwap,
    /// Alternating chunks from either input.
    ChunkMix,
    /// Random single-byte overwrites from the secondary input.
    ByteReplace,
    /// Random byte corruption inside the header copy.
    HeaderCorrupt,
}

impl Strategy {
    /// All strategies in declaration order.
    pub const ALL: [Strategy; 5] = [
        Strategy::SmartMosh,
        Strategy::HexSwap,
        Strategy::ChunkMix,
        Strategy::ByteReplace,
        Strategy::HeaderCorrupt,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SmartMosh => "smart_mosh",
            Strategy::HexSwap => "hex_swap",
            Strategy::ChunkMix => "chunk_mix",
            Strategy::ByteReplace => "byte_replace",
            Strategy::HeaderCorrupt => "header_corrupt",
        }
    }

    /// Parses a strategy name, falling back to [`Strategy::SmartMosh`].
    ///
    /// The second element is `true` when the name was not recognised and the
    /// fallback was taken.
    pub fn from_name_lenient(name: &str) -> (Strategy, bool) {
        match name.parse::<Strategy>() {
            Ok(strategy) => (strategy, false),
            Err(_) => (Strategy::SmartMosh, true),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "smart_mosh" | "smartmosh" | "smart" => Ok(Strategy::SmartMosh),
            "hex_swap" | "hexswap" | "hex" => Ok(Strategy::HexSwap),
            "chunk_mix" | "chunkmix" | "chunk" => Ok(Strategy::ChunkMix),
            "byte_replace" | "bytereplace" | "replace" => Ok(Strategy::ByteReplace),
            "header_corrupt" | "headercorrupt" | "header" => Ok(Strategy::HeaderCorrupt),
            _ => Err(ParseParamError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Glitch size class. Each strategy maps it to its own length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// Short glitches.
    Small,
    /// Medium glitches.
    #[default]
    Medium,
    /// Long glitches.
    Large,
}

impl SizeClass {
    /// Maps the control-layer level (1 = Small, 2 = Medium, 3 = Large).
    ///
    /// Levels below 1 clamp to Small, above 3 to Large.
    pub fn from_level(level: i64) -> SizeClass {
        match level {
            i64::MIN..=1 => SizeClass::Small,
            2 => SizeClass::Medium,
            _ => SizeClass::Large,
        }
    }

    /// Control-layer level for this class.
    pub fn level(&self) -> u8 {
        match self {
            SizeClass::Small => 1,
            SizeClass::Medium => 2,
            SizeClass::Large => 3,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeClass {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(level) = trimmed.parse::<i64>() {
            return Ok(SizeClass::from_level(level));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(SizeClass::Small),
            "medium" | "m" => Ok(SizeClass::Medium),
            "large" | "l" => Ok(SizeClass::Large),
            _ => Err(ParseParamError::UnknownSize(s.to_string())),
        }
    }
}

/// Errors from parsing parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseParamError {
    /// Strategy name not recognised.
    #[error("unknown strategy '{0}' (expected one of smart_mosh, hex_swap, chunk_mix, byte_replace, header_corrupt)")]
    UnknownStrategy(String),

    /// Size name not recognised.
    #[error("unknown glitch size '{0}' (expected small, medium, large, or 1-3)")]
    UnknownSize(String),

    /// Preset name not recognised.
    #[error("unknown preset '{0}' (expected smart or block)")]
    UnknownPreset(String),
}

/// Parameters for one mixing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlitchParameters {
    #[serde(deserialize_with = "deserialize_intensity")]
    intensity: u8,
    /// Glitch size class.
    #[serde(default)]
    pub size: SizeClass,
    /// Strategy to run.
    #[serde(default)]
    pub strategy: Strategy,
    /// Seed for the per-call random stream.
    #[serde(default)]
    pub seed: u32,
}

impl GlitchParameters {
    /// Creates parameters with the given intensity (clamped to 0..=100),
    /// medium size, smart mosh, and seed 0.
    pub fn new(intensity: u32) -> Self {
        Self {
            intensity: clamp_intensity(intensity as i64),
            size: SizeClass::default(),
            strategy: Strategy::default(),
            seed: 0,
        }
    }

    /// Sets the size class.
    pub fn with_size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Intensity in 0..=100.
    pub fn intensity(&self) -> u8 {
        self.intensity
    }
}

impl Default for GlitchParameters {
    fn default() -> Self {
        Self::new(50)
    }
}

fn clamp_intensity(value: i64) -> u8 {
    value.clamp(0, MAX_INTENSITY as i64) as u8
}

fn deserialize_intensity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(clamp_intensity(raw))
}
