//! Sample-domain datamosh: splice faded blocks of the secondary into the primary.

use tracing::{debug, trace};
use wavmosh_spec::{ModeSelection, ModeWeights, SmartMoshConfig, Strategy};

use super::blend::{fade_length, fade_weight, soft_clip};
use super::{GlitchInput, GlitchOutput, GlitchStrategy};
use crate::codec::{PcmBuffer, SampleCodec};
use crate::energy::find_interesting_points;
use crate::error::MoshWarning;
use crate::rng::MoshRng;

/// How a glitched sample is derived from the secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubMode {
    /// Attenuated secondary sample.
    Direct,
    /// Half primary, half attenuated secondary.
    Blend,
    /// Secondary with low bits flipped, attenuated.
    BitFlip,
    /// Secondary mixed with a delayed primary sample.
    Echo,
}

impl SubMode {
    /// Draws a mode by weight. Falls back to `Direct` if all weights are zero.
    pub fn pick(weights: &ModeWeights, rng: &mut dyn MoshRng) -> SubMode {
        let total = weights.total();
        if total <= 0.0 {
            return SubMode::Direct;
        }
        let mut roll = rng.next_unit() * total;
        for (mode, weight) in [
            (SubMode::Direct, weights.direct),
            (SubMode::Blend, weights.blend),
            (SubMode::BitFlip, weights.bit_flip),
            (SubMode::Echo, weights.echo),
        ] {
            if roll < weight {
                return mode;
            }
            roll -= weight;
        }
        // Rounding left a sliver past the last bucket.
        SubMode::Direct
    }
}

/// One placed glitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlitchBlock {
    /// Destination start, in samples.
    pub start: usize,
    /// Length, in samples.
    pub length: usize,
    /// Source start in the secondary, in samples.
    pub source: usize,
    /// Fade-in and fade-out length, in samples.
    pub fade: usize,
    /// Mode for the whole block, or `None` to draw per sample.
    pub mode: Option<SubMode>,
}

/// The default strategy.
#[derive(Debug, Clone, Default)]
pub struct SmartMosh {
    config: SmartMoshConfig,
}

impl SmartMosh {
    /// Creates the strategy from its tuning table.
    pub fn new(config: SmartMoshConfig) -> Self {
        Self { config }
    }

    /// Tuning table in use.
    pub fn config(&self) -> &SmartMoshConfig {
        &self.config
    }

    fn place_block(
        &self,
        primary_len: usize,
        secondary_len: usize,
        min_length: usize,
        max_length: usize,
        points: &[usize],
        rng: &mut dyn MoshRng,
    ) -> GlitchBlock {
        // Upper bound is exclusive; equal bounds give exactly that length.
        let length = (min_length + rng.below(max_length.saturating_sub(min_length)))
            .clamp(1, primary_len);
        let max_start = primary_len - length;

        let start = if !points.is_empty() && rng.chance(self.config.interesting_point_bias) {
            points[rng.below(points.len())].min(max_start)
        } else {
            rng.below(max_start + 1)
        };

        let source = if secondary_len >= length {
            rng.below(secondary_len - length + 1)
        } else {
            0
        };

        let mode = match self.config.mode_selection {
            ModeSelection::PerSample => None,
            ModeSelection::PerBlock => Some(SubMode::pick(&self.config.mode_weights, rng)),
        };

        GlitchBlock {
            start,
            length,
            source,
            fade: fade_length(length, self.config.fade_fraction, self.config.fade_floor),
            mode,
        }
    }

    fn render_block(
        &self,
        block: &GlitchBlock,
        primary: &[i32],
        secondary: &[i32],
        out: &mut [i32],
        codec: &dyn SampleCodec,
        rng: &mut dyn MoshRng,
    ) {
        let cfg = &self.config;
        let last_source = secondary.len() - 1;
        let (min_value, max_value) = (codec.min_value(), codec.max_value());

        for j in 0..block.length {
            let index = block.start + j;
            let p = primary[index] as f64;
            let s = secondary[(block.source + j).min(last_source)];
            let mode = match block.mode {
                Some(mode) => mode,
                None => SubMode::pick(&cfg.mode_weights, rng),
            };

            let candidate = match mode {
                SubMode::Direct => (s as f64 * cfg.volume_reduction).floor(),
                SubMode::Blend => (p * 0.5 + s as f64 * cfg.volume_reduction * 0.5).floor(),
                SubMode::BitFlip => ((s ^ cfg.xor_mask) as f64 * cfg.volume_reduction).floor(),
                SubMode::Echo => {
                    let delayed = primary[index.saturating_sub(cfg.echo_delay)] as f64;
                    (s as f64 * 0.6 + delayed * 0.4).floor()
                }
            };

            let w = fade_weight(j, block.length, block.fade);
            let mixed = (p * (1.0 - w) + candidate * w).floor();
            out[index] = soft_clip(mixed, min_value, max_value, cfg.clip_threshold, cfg.clip_damping);
        }
    }
}

impl GlitchStrategy for SmartMosh {
    fn strategy(&self) -> Strategy {
        Strategy::SmartMosh
    }

    fn apply(&self, input: &GlitchInput<'_>, rng: &mut dyn MoshRng) -> GlitchOutput {
        let codec = input.depth.codec();
        let primary_buf = PcmBuffer::new(input.primary, input.depth);
        let primary = primary_buf.decode();
        let secondary = codec.decode(input.secondary);

        let profile = self.config.sizes.get(input.size);
        let count = profile.glitch_count(input.intensity);

        if primary.is_empty() || count == 0 {
            return GlitchOutput::with_payload(input, input.primary.to_vec(), 0);
        }
        if secondary.is_empty() {
            debug!("secondary has no whole samples, skipping glitch placement");
            return GlitchOutput::with_payload(input, input.primary.to_vec(), 0)
                .warn(MoshWarning::EmptySecondary);
        }

        // Window offsets are bytes; blocks are placed in samples.
        let points: Vec<usize> = if self.config.energy_guided {
            find_interesting_points(input.primary, count)
                .into_iter()
                .map(|byte| byte / codec.bytes_per_sample())
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            glitches = count,
            samples = primary.len(),
            points = points.len(),
            "placing smart mosh blocks"
        );

        let mut result = primary.clone();
        let mut short_source: Option<usize> = None;
        for _ in 0..count {
            let block = self.place_block(
                primary.len(),
                secondary.len(),
                profile.min_length,
                profile.max_length,
                &points,
                rng,
            );
            if block.length > secondary.len() {
                short_source = Some(short_source.map_or(block.length, |n| n.max(block.length)));
            }
            trace!(?block, "glitch block");
            self.render_block(&block, &primary, &secondary, &mut result, codec, rng);
        }

        let mut payload = codec.encode(&result);
        payload.extend_from_slice(primary_buf.trailing_bytes());

        let mut output = GlitchOutput::with_payload(input, payload, count);
        if let Some(requested) = short_source {
            output = output.warn(MoshWarning::SourceTooShort {
                requested,
                available: secondary.len(),
            });
        }
        output
    }
}
