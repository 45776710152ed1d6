//! Overridable constant table for the mixing strategies.
//!
//! Every tunable the strategies use lives here with one documented default.
//! Callers can start from a [`Preset`], tweak fields, or load the whole table
//! from JSON; omitted fields fall back to the default profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::{ParseParamError, SizeClass};

/// Full configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoshConfig {
    /// Smart mosh constants.
    pub smart_mosh: SmartMoshConfig,
    /// Chunk mix constants.
    pub chunk_mix: ChunkMixConfig,
    /// Header corruption constants.
    pub header_corrupt: HeaderCorruptConfig,
}

impl Default for MoshConfig {
    fn default() -> Self {
        Self::smart()
    }
}

impl MoshConfig {
    /// Energy-guided, per-sample blending profile.
    pub fn smart() -> Self {
        Self {
            smart_mosh: SmartMoshConfig::default(),
            chunk_mix: ChunkMixConfig::default(),
            header_corrupt: HeaderCorruptConfig::default(),
        }
    }

    /// Whole-block substitution profile.
    ///
    /// One sub-mode per block, shorter fades, no energy guidance, and only the
    /// final hard clamp (soft-clip threshold at full scale).
    pub fn block_substitution() -> Self {
        Self {
            smart_mosh: SmartMoshConfig {
                sizes: SizeTable {
                    small: SizeProfile::new(5_000, 15_000, 30, 5),
                    medium: SizeProfile::new(15_000, 40_000, 30, 5),
                    large: SizeProfile::new(40_000, 90_000, 30, 5),
                },
                fade_fraction: 0.2,
                fade_floor: 0,
                volume_reduction: 0.5,
                mode_weights: ModeWeights {
                    direct: 0.5,
                    blend: 0.3,
                    bit_flip: 0.0,
                    echo: 0.2,
                },
                mode_selection: ModeSelection::PerBlock,
                clip_threshold: 1.0,
                energy_guided: false,
                ..SmartMoshConfig::default()
            },
            ..Self::smart()
        }
    }

    /// Builds the table for a preset.
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Smart => Self::smart(),
            Preset::Block => Self::block_substitution(),
        }
    }

    /// Parses a JSON configuration table.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the table to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// [`MoshConfig::smart`].
    #[default]
    Smart,
    /// [`MoshConfig::block_substitution`].
    Block,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Smart => f.write_str("smart"),
            Preset::Block => f.write_str("block"),
        }
    }
}

impl FromStr for Preset {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smart" => Ok(Preset::Smart),
            "block" | "block_substitution" => Ok(Preset::Block),
            _ => Err(ParseParamError::UnknownPreset(s.to_string())),
        }
    }
}

/// Glitch length range and count policy for one size class.
///
/// Lengths are in samples. The glitch count is
/// `floor(intensity / 100 * count_scale) + count_base`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeProfile {
    /// Shortest glitch, in samples.
    pub min_length: usize,
    /// Longest glitch, in samples.
    pub max_length: usize,
    /// Glitches added at full intensity.
    pub count_scale: u32,
    /// Glitches placed even at zero intensity.
    pub count_base: u32,
}

impl SizeProfile {
    /// Creates a size profile.
    pub const fn new(min_length: usize, max_length: usize, count_scale: u32, count_base: u32) -> Self {
        Self {
            min_length,
            max_length,
            count_scale,
            count_base,
        }
    }

    /// Number of glitches for an intensity in 0..=100.
    pub fn glitch_count(&self, intensity: u8) -> usize {
        let scaled = (intensity.min(100) as f64 / 100.0 * self.count_scale as f64).floor();
        scaled as usize + self.count_base as usize
    }
}

/// Size profiles keyed by [`SizeClass`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeTable {
    /// Small glitches.
    pub small: SizeProfile,
    /// Medium glitches.
    pub medium: SizeProfile,
    /// Large glitches.
    pub large: SizeProfile,
}

impl SizeTable {
    /// Profile for a size class.
    pub fn get(&self, size: SizeClass) -> &SizeProfile {
        match size {
            SizeClass::Small => &self.small,
            SizeClass::Medium => &self.medium,
            SizeClass::Large => &self.large,
        }
    }

    /// Iterates `(class, profile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SizeClass, &SizeProfile)> {
        [
            (SizeClass::Small, &self.small),
            (SizeClass::Medium, &self.medium),
            (SizeClass::Large, &self.large),
        ]
        .into_iter()
    }
}

impl Default for SizeTable {
    fn default() -> Self {
        Self {
            small: SizeProfile::new(4_000, 15_000, 50, 10),
            medium: SizeProfile::new(15_000, 50_000, 50, 10),
            large: SizeProfile::new(50_000, 120_000, 50, 10),
        }
    }
}

/// Relative weights of the smart mosh sub-modes.
///
/// Weights need not sum to one; they are normalised when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeWeights {
    /// Attenuated secondary sample.
    pub direct: f64,
    /// Half primary, half attenuated secondary.
    pub blend: f64,
    /// Secondary sample XORed with the mask, then attenuated.
    pub bit_flip: f64,
    /// Secondary mixed with an earlier primary sample.
    pub echo: f64,
}

impl ModeWeights {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.direct + self.blend + self.bit_flip + self.echo
    }
}

impl Default for ModeWeights {
    fn default() -> Self {
        Self {
            direct: 0.70,
            blend: 0.25,
            bit_flip: 0.05,
            echo: 0.0,
        }
    }
}

/// How often the smart mosh sub-mode is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSelection {
    /// A fresh sub-mode for every sample.
    #[default]
    PerSample,
    /// One sub-mode for the whole glitch block.
    PerBlock,
}

/// Smart mosh constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartMoshConfig {
    /// Length range and count policy per size class.
    pub sizes: SizeTable,
    /// Fade length as a fraction of the glitch length.
    pub fade_fraction: f64,
    /// Minimum fade length in samples (still capped at half the glitch).
    pub fade_floor: usize,
    /// Gain applied to secondary samples before blending.
    pub volume_reduction: f64,
    /// Sub-mode weights.
    pub mode_weights: ModeWeights,
    /// Sub-mode draw granularity.
    pub mode_selection: ModeSelection,
    /// Mask for the bit-flip sub-mode.
    pub xor_mask: i32,
    /// Echo distance in samples.
    pub echo_delay: usize,
    /// Soft-clip threshold as a fraction of full scale.
    pub clip_threshold: f64,
    /// Gain applied to the part of a sample above the threshold.
    pub clip_damping: f64,
    /// Fraction of placements that start at an interesting point.
    pub interesting_point_bias: f64,
    /// Whether the energy analyzer guides placement.
    pub energy_guided: bool,
}

impl Default for SmartMoshConfig {
    fn default() -> Self {
        Self {
            sizes: SizeTable::default(),
            fade_fraction: 0.3,
            fade_floor: 500,
            volume_reduction: 0.5,
            mode_weights: ModeWeights::default(),
            mode_selection: ModeSelection::PerSample,
            xor_mask: 0x00FF,
            echo_delay: 500,
            clip_threshold: 0.75,
            clip_damping: 0.3,
            interesting_point_bias: 0.75,
            energy_guided: true,
        }
    }
}

/// Chunk mix constants.
///
/// The chunk size in bytes is
/// `max(min_chunk, base * (1 - intensity_shrink * intensity / 100))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkMixConfig {
    /// Base chunk for small glitches, in bytes.
    pub small_chunk: usize,
    /// Base chunk for medium glitches, in bytes.
    pub medium_chunk: usize,
    /// Base chunk for large glitches, in bytes.
    pub large_chunk: usize,
    /// Smallest chunk, in bytes.
    pub min_chunk: usize,
    /// How much full intensity shrinks the base chunk.
    pub intensity_shrink: f64,
}

impl ChunkMixConfig {
    /// Base chunk for a size class.
    pub fn base_chunk(&self, size: SizeClass) -> usize {
        match size {
            SizeClass::Small => self.small_chunk,
            SizeClass::Medium => self.medium_chunk,
            SizeClass::Large => self.large_chunk,
        }
    }

    /// Chunk length in bytes for a size class and intensity, before sample alignment.
    pub fn chunk_len(&self, size: SizeClass, intensity: u8) -> usize {
        let base = self.base_chunk(size) as f64;
        let shrink = 1.0 - self.intensity_shrink * (intensity.min(100) as f64 / 100.0);
        ((base * shrink).floor() as usize).max(self.min_chunk).max(1)
    }
}

impl Default for ChunkMixConfig {
    fn default() -> Self {
        Self {
            small_chunk: 2_048,
            medium_chunk: 8_192,
            large_chunk: 32_768,
            min_chunk: 64,
            intensity_shrink: 0.75,
        }
    }
}

/// Header corruption constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderCorruptConfig {
    /// Leading bytes never touched (RIFF tag, size, WAVE tag).
    pub protected_prefix: usize,
    /// Expected header length.
    pub header_length: usize,
}

impl Default for HeaderCorruptConfig {
    fn default() -> Self {
        Self {
            protected_prefix: 12,
            header_length: 44,
        }
    }
}
