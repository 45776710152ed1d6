//! Alternating runs of primary and secondary chunks.

use tracing::debug;
use wavmosh_spec::{ChunkMixConfig, Strategy};

use super::{GlitchInput, GlitchOutput, GlitchStrategy};
use crate::rng::MoshRng;

/// Walks the primary in fixed chunks, switching source with probability
/// `intensity / 100` after each chunk.
///
/// Chunks are aligned to whole samples. A secondary chunk that would run past
/// the end of the secondary keeps the primary bytes instead.
#[derive(Debug, Clone, Default)]
pub struct ChunkMix {
    config: ChunkMixConfig,
}

impl ChunkMix {
    /// Creates the strategy from its tuning table.
    pub fn new(config: ChunkMixConfig) -> Self {
        Self { config }
    }

    /// Chunk length in bytes, rounded down to whole samples.
    pub fn aligned_chunk(&self, input: &GlitchInput<'_>) -> usize {
        let width = input.depth.codec().bytes_per_sample();
        let raw = self.config.chunk_len(input.size, input.intensity);
        (raw - raw % width).max(width)
    }
}

impl GlitchStrategy for ChunkMix {
    fn strategy(&self) -> Strategy {
        Strategy::ChunkMix
    }

    fn apply(&self, input: &GlitchInput<'_>, rng: &mut dyn MoshRng) -> GlitchOutput {
        let p = input.probability();
        let chunk = self.aligned_chunk(input);
        let len = input.primary.len();
        let mut payload = input.primary.to_vec();
        let mut from_secondary = false;
        let mut taken = 0;

        for start in (0..len).step_by(chunk) {
            let end = (start + chunk).min(len);
            if from_secondary && end <= input.secondary.len() {
                payload[start..end].copy_from_slice(&input.secondary[start..end]);
                taken += 1;
            }
            if rng.chance(p) {
                from_secondary = !from_secondary;
            }
        }

        debug!(chunk, taken, "chunk mix done");
        GlitchOutput::with_payload(input, payload, taken)
    }
}
