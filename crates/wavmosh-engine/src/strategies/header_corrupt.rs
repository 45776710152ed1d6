//! Random byte corruption inside the header's format fields.

use tracing::debug;
use wavmosh_spec::{HeaderCorruptConfig, Strategy};

use super::{GlitchInput, GlitchOutput, GlitchStrategy};
use crate::rng::MoshRng;

/// Overwrites `floor((header_length - protected_prefix) * intensity / 200)`
/// random header bytes with random values. The protected prefix and the
/// audio payload are left alone.
#[derive(Debug, Clone, Default)]
pub struct HeaderCorrupt {
    config: HeaderCorruptConfig,
}

impl HeaderCorrupt {
    /// Creates the strategy from its tuning table.
    pub fn new(config: HeaderCorruptConfig) -> Self {
        Self { config }
    }

    /// Byte range eligible for corruption in a header of `len` bytes.
    pub fn corruptible(&self, len: usize) -> std::ops::Range<usize> {
        let end = self.config.header_length.min(len);
        let start = self.config.protected_prefix.min(end);
        start..end
    }
}

impl GlitchStrategy for HeaderCorrupt {
    fn strategy(&self) -> Strategy {
        Strategy::HeaderCorrupt
    }

    fn apply(&self, input: &GlitchInput<'_>, rng: &mut dyn MoshRng) -> GlitchOutput {
        let mut header = input.header.to_vec();
        let range = self.corruptible(header.len());
        let span = range.len();
        let writes = span * input.intensity.min(100) as usize / 200;

        for _ in 0..writes {
            let pos = range.start + rng.below(span);
            header[pos] = rng.below(256) as u8;
        }

        debug!(writes, span, "header corrupt done");
        GlitchOutput {
            header,
            payload: input.primary.to_vec(),
            glitches: writes,
            warnings: Vec::new(),
        }
    }
}
