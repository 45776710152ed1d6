//! Random single-byte writes from random secondary offsets.

use tracing::debug;
use wavmosh_spec::Strategy;

use super::{GlitchInput, GlitchOutput, GlitchStrategy};
use crate::error::MoshWarning;
use crate::rng::MoshRng;

/// Performs `floor(len * intensity / 100)` writes. Each write picks a
/// destination and a source offset uniformly over the primary's length and is
/// skipped if the source lies past the secondary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteReplace;

impl ByteReplace {
    /// Number of write attempts for a payload length and intensity.
    pub fn attempts(len: usize, intensity: u8) -> usize {
        (len as u64 * intensity.min(100) as u64 / 100) as usize
    }
}

impl GlitchStrategy for ByteReplace {
    fn strategy(&self) -> Strategy {
        Strategy::ByteReplace
    }

    fn apply(&self, input: &GlitchInput<'_>, rng: &mut dyn MoshRng) -> GlitchOutput {
        let len = input.primary.len();
        let attempts = Self::attempts(len, input.intensity);
        let mut payload = input.primary.to_vec();
        let mut replaced = 0;

        for _ in 0..attempts {
            let pos = rng.below(len);
            let src = rng.below(len);
            if let Some(&byte) = input.secondary.get(src) {
                payload[pos] = byte;
                replaced += 1;
            }
        }

        debug!(attempts, replaced, "byte replace done");
        let output = GlitchOutput::with_payload(input, payload, replaced);
        if input.secondary.is_empty() && attempts > 0 {
            output.warn(MoshWarning::EmptySecondary)
        } else {
            output
        }
    }
}
