//! Byte-wise substitution from the secondary at matching offsets.

use tracing::debug;
use wavmosh_spec::Strategy;

use super::{GlitchInput, GlitchOutput, GlitchStrategy};
use crate::rng::MoshRng;

/// Replaces each primary byte with the secondary's byte at the same offset
/// with probability `intensity / 100`. Offsets past the secondary stay untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexSwap;

impl GlitchStrategy for HexSwap {
    fn strategy(&self) -> Strategy {
        Strategy::HexSwap
    }

    fn apply(&self, input: &GlitchInput<'_>, rng: &mut dyn MoshRng) -> GlitchOutput {
        let p = input.probability();
        let mut payload = input.primary.to_vec();
        let mut swapped = 0;

        for (byte, &replacement) in payload.iter_mut().zip(input.secondary) {
            if rng.chance(p) {
                *byte = replacement;
                swapped += 1;
            }
        }

        debug!(swapped, len = payload.len(), "hex swap done");
        GlitchOutput::with_payload(input, payload, swapped)
    }
}
