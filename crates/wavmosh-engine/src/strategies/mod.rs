//! Glitch strategies.
//!
//! Every strategy takes the primary and secondary payloads and produces a
//! fresh payload of the primary's length. Only [`HeaderCorrupt`] touches the
//! header copy.

mod blend;
mod byte_replace;
mod chunk_mix;
mod header_corrupt;
mod hex_swap;
mod smart_mosh;

#[cfg(test)]
mod tests_smart_mosh;

pub use blend::{fade_length, fade_weight, soft_clip};
pub use byte_replace::ByteReplace;
pub use chunk_mix::ChunkMix;
pub use header_corrupt::HeaderCorrupt;
pub use hex_swap::HexSwap;
pub use smart_mosh::{GlitchBlock, SmartMosh, SubMode};

use wavmosh_spec::{MoshConfig, SizeClass, Strategy};

use crate::codec::BitDepth;
use crate::error::MoshWarning;
use crate::rng::MoshRng;

/// Everything a strategy reads.
#[derive(Debug, Clone, Copy)]
pub struct GlitchInput<'a> {
    /// Header of the primary file.
    pub header: &'a [u8],
    /// Primary payload.
    pub primary: &'a [u8],
    /// Secondary payload.
    pub secondary: &'a [u8],
    /// Resolved bit depth.
    pub depth: BitDepth,
    /// Intensity in 0..=100.
    pub intensity: u8,
    /// Glitch size class.
    pub size: SizeClass,
}

impl GlitchInput<'_> {
    /// Intensity as a probability in [0, 1].
    pub fn probability(&self) -> f64 {
        self.intensity.min(100) as f64 / 100.0
    }
}

/// What a strategy produces.
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchOutput {
    /// Header to prefix the payload with.
    pub header: Vec<u8>,
    /// New payload, same length as the primary.
    pub payload: Vec<u8>,
    /// Number of glitch events applied (blocks, bytes, or chunks).
    pub glitches: usize,
    /// Policy decisions taken along the way.
    pub warnings: Vec<MoshWarning>,
}

impl GlitchOutput {
    /// Output with an untouched header copy.
    pub(crate) fn with_payload(input: &GlitchInput<'_>, payload: Vec<u8>, glitches: usize) -> Self {
        Self {
            header: input.header.to_vec(),
            payload,
            glitches,
            warnings: Vec::new(),
        }
    }

    /// Attaches a warning.
    pub(crate) fn warn(mut self, warning: MoshWarning) -> Self {
        self.warnings.push(warning);
        self
    }
}

/// A mixing strategy.
pub trait GlitchStrategy {
    /// Which strategy this is.
    fn strategy(&self) -> Strategy;

    /// Runs the strategy. Never mutates the inputs.
    fn apply(&self, input: &GlitchInput<'_>, rng: &mut dyn MoshRng) -> GlitchOutput;
}

/// Builds the strategy for a name using the configuration table.
pub fn build_strategy(strategy: Strategy, config: &MoshConfig) -> Box<dyn GlitchStrategy> {
    match strategy {
        Strategy::SmartMosh => Box::new(SmartMosh::new(config.smart_mosh.clone())),
        Strategy::HexSwap => Box::new(HexSwap),
        Strategy::ChunkMix => Box::new(ChunkMix::new(config.chunk_mix.clone())),
        Strategy::ByteReplace => Box::new(ByteReplace),
        Strategy::HeaderCorrupt => Box::new(HeaderCorrupt::new(config.header_corrupt.clone())),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn input<'a>(primary: &'a [u8], secondary: &'a [u8], intensity: u8) -> GlitchInput<'a> {
        GlitchInput {
            header: &[],
            primary,
            secondary,
            depth: BitDepth::Pcm16,
            intensity,
            size: SizeClass::Small,
        }
    }
}
