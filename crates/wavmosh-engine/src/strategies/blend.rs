//! Fade curves and clipping shared by sample-domain strategies.

use std::f64::consts::PI;

/// Fade length for a glitch block.
///
/// `max(floor, length * fraction)`, capped at half the block so fade-in and
/// fade-out never overlap. A capped fade covers the whole block with no flat
/// plateau.
pub fn fade_length(length: usize, fraction: f64, floor: usize) -> usize {
    let proportional = (length as f64 * fraction).floor() as usize;
    proportional.max(floor).min(length / 2)
}

/// Raised-cosine blend weight at offset `j` of a block.
///
/// Rises from 0 over the first `fade` samples, holds at 1, and falls back
/// over the last `fade` samples. A zero fade is a hard switch.
#[inline]
pub fn fade_weight(j: usize, length: usize, fade: usize) -> f64 {
    if fade == 0 {
        return 1.0;
    }
    let fade_f = fade as f64;
    if j < fade {
        (1.0 - (PI * j as f64 / fade_f).cos()) / 2.0
    } else if j > length - fade {
        (1.0 + (PI * (j - (length - fade)) as f64 / fade_f).cos()) / 2.0
    } else {
        1.0
    }
}

/// Soft-clips then hard-clamps a sample.
///
/// Above `threshold * max_value` the excess is scaled by `damping`. The result
/// is clamped to `[min_value, max_value]`.
#[inline]
pub fn soft_clip(sample: f64, min_value: i32, max_value: i32, threshold: f64, damping: f64) -> i32 {
    let knee = max_value as f64 * threshold;
    let abs = sample.abs();
    let shaped = if abs > knee {
        (sample.signum() * (knee + (abs - knee) * damping)).floor()
    } else {
        sample
    };
    shaped.clamp(min_value as f64, max_value as f64) as i32
}
