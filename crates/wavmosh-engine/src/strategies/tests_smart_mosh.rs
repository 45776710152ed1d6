//! Tests for the smart mosh strategy.

use pretty_assertions::assert_eq;
use wavmosh_spec::{ModeSelection, ModeWeights, SizeClass, SizeProfile, SizeTable, SmartMoshConfig};

use super::test_support::input;
use super::*;
use crate::codec::{BitDepth, SampleCodec};
use crate::rng::{create_rng, ScriptedRng};

fn encode16(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

fn uniform_sizes(profile: SizeProfile) -> SizeTable {
    SizeTable {
        small: profile,
        medium: profile,
        large: profile,
    }
}

/// One full-length block, no fades, direct mode only.
fn single_block_config(len: usize) -> SmartMoshConfig {
    SmartMoshConfig {
        sizes: uniform_sizes(SizeProfile::new(len, len, 0, 1)),
        fade_fraction: 0.0,
        fade_floor: 0,
        mode_weights: ModeWeights {
            direct: 1.0,
            blend: 0.0,
            bit_flip: 0.0,
            echo: 0.0,
        },
        mode_selection: ModeSelection::PerBlock,
        clip_threshold: 1.0,
        energy_guided: false,
        ..SmartMoshConfig::default()
    }
}

// ============================================================================
// Sub-mode selection
// ============================================================================

#[test]
fn test_sub_mode_pick_by_weight() {
    let weights = ModeWeights::default();
    let mut rng = ScriptedRng::new(vec![0.0, 0.69, 0.71, 0.96]);
    assert_eq!(SubMode::pick(&weights, &mut rng), SubMode::Direct);
    assert_eq!(SubMode::pick(&weights, &mut rng), SubMode::Direct);
    assert_eq!(SubMode::pick(&weights, &mut rng), SubMode::Blend);
    assert_eq!(SubMode::pick(&weights, &mut rng), SubMode::BitFlip);
}

#[test]
fn test_sub_mode_pick_echo_weight() {
    let weights = ModeWeights {
        direct: 0.5,
        blend: 0.3,
        bit_flip: 0.0,
        echo: 0.2,
    };
    let mut rng = ScriptedRng::new(vec![0.85]);
    assert_eq!(SubMode::pick(&weights, &mut rng), SubMode::Echo);
}

#[test]
fn test_sub_mode_pick_zero_weights() {
    let weights = ModeWeights {
        direct: 0.0,
        blend: 0.0,
        bit_flip: 0.0,
        echo: 0.0,
    };
    let mut rng = ScriptedRng::constant(0.5);
    assert_eq!(SubMode::pick(&weights, &mut rng), SubMode::Direct);
    assert_eq!(rng.draws(), 0);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_zero_glitches_is_exact_copy() {
    let config = SmartMoshConfig {
        sizes: uniform_sizes(SizeProfile::new(100, 200, 50, 0)),
        ..SmartMoshConfig::default()
    };
    let primary = encode16(&[1, -2, 300, -400, 5000, 32767, -32768]);
    let secondary = encode16(&[9; 7]);
    let out = SmartMosh::new(config).apply(&input(&primary, &secondary, 0), &mut create_rng(5));
    assert_eq!(out.payload, primary);
    assert_eq!(out.glitches, 0);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_direct_block_attenuates_secondary() {
    let primary = encode16(&[0; 100]);
    let secondary = encode16(&[1000; 100]);
    let out = SmartMosh::new(single_block_config(100))
        .apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    assert_eq!(out.payload, encode16(&[500; 100]));
    assert_eq!(out.glitches, 1);
}

#[test]
fn test_block_length_excludes_max() {
    let mut config = single_block_config(0);
    config.sizes = uniform_sizes(SizeProfile::new(10, 20, 0, 1));
    let primary = encode16(&[0; 100]);
    let secondary = encode16(&[1000; 1000]);

    // The highest possible draw still stops one short of the maximum.
    let out = SmartMosh::new(config)
        .apply(&input(&primary, &secondary, 50), &mut ScriptedRng::constant(0.999_999));
    let samples = crate::codec::Pcm16Codec.decode(&out.payload);
    assert_eq!(samples.iter().filter(|&&s| s == 500).count(), 19);
    assert!(samples[81..].iter().all(|&s| s == 500));
}

#[test]
fn test_blend_block_halves_both() {
    let mut config = single_block_config(10);
    config.mode_weights = ModeWeights {
        direct: 0.0,
        blend: 1.0,
        bit_flip: 0.0,
        echo: 0.0,
    };
    let primary = encode16(&[2000; 10]);
    let secondary = encode16(&[1000; 10]);
    let out = SmartMosh::new(config).apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    // 2000 * 0.5 + 1000 * 0.5 * 0.5
    assert_eq!(out.payload, encode16(&[1250; 10]));
}

#[test]
fn test_bit_flip_block() {
    let mut config = single_block_config(4);
    config.mode_weights = ModeWeights {
        direct: 0.0,
        blend: 0.0,
        bit_flip: 1.0,
        echo: 0.0,
    };
    config.volume_reduction = 1.0;
    let primary = encode16(&[0; 4]);
    let secondary = encode16(&[0x0100; 4]);
    let out = SmartMosh::new(config).apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    assert_eq!(out.payload, encode16(&[0x01FF; 4]));
}

#[test]
fn test_echo_reads_delayed_primary() {
    let mut config = single_block_config(4);
    config.mode_weights = ModeWeights {
        direct: 0.0,
        blend: 0.0,
        bit_flip: 0.0,
        echo: 1.0,
    };
    config.echo_delay = 2;
    let primary = encode16(&[100, 200, 300, 400]);
    let secondary = encode16(&[0; 4]);
    let out = SmartMosh::new(config).apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    // Delay saturates at index 0 for the first two samples.
    assert_eq!(out.payload, encode16(&[40, 40, 40, 80]));
}

#[test]
fn test_soft_clip_applied() {
    let mut config = single_block_config(8);
    config.volume_reduction = 1.0;
    config.clip_threshold = 0.75;
    config.clip_damping = 0.3;
    let primary = encode16(&[0; 8]);
    let secondary = encode16(&[32767; 8]);
    let out = SmartMosh::new(config).apply(&input(&primary, &secondary, 50), &mut create_rng(1));

    let knee: f64 = 32767.0 * 0.75;
    let expected = (knee + (32767.0 - knee) * 0.3_f64).floor() as i16;
    assert_eq!(out.payload, encode16(&[expected; 8]));
}

#[test]
fn test_fades_start_from_primary() {
    let mut config = single_block_config(100);
    config.fade_fraction = 0.2;
    let primary = encode16(&[0; 100]);
    let secondary = encode16(&[10_000; 100]);
    let out = SmartMosh::new(config).apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    let samples = crate::codec::Pcm16Codec.decode(&out.payload);

    assert_eq!(samples[0], 0);
    assert_eq!(samples[50], 5_000);
    assert!(samples[99] < 100);
    assert!(samples[..20].windows(2).all(|w| w[0] <= w[1]));
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_empty_secondary_warns_and_copies() {
    let primary = encode16(&[7; 64]);
    let out = SmartMosh::default().apply(&input(&primary, &[], 80), &mut create_rng(2));
    assert_eq!(out.payload, primary);
    assert_eq!(out.warnings, vec![MoshWarning::EmptySecondary]);
}

#[test]
fn test_short_secondary_clamps_and_warns() {
    let primary = encode16(&[0; 100]);
    let secondary = encode16(&[1000; 10]);
    let out = SmartMosh::new(single_block_config(100))
        .apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    // Reads past the end repeat the last secondary sample.
    assert_eq!(out.payload, encode16(&[500; 100]));
    assert_eq!(
        out.warnings,
        vec![MoshWarning::SourceTooShort {
            requested: 100,
            available: 10
        }]
    );
}

#[test]
fn test_glitch_longer_than_primary_is_capped() {
    let primary = encode16(&[0; 10]);
    let secondary = encode16(&[1000; 1000]);
    let out = SmartMosh::new(single_block_config(500))
        .apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    assert_eq!(out.payload, encode16(&[500; 10]));
}

#[test]
fn test_trailing_byte_preserved() {
    let mut primary = encode16(&[0; 50]);
    primary.push(0xAB);
    let secondary = encode16(&[1000; 50]);
    let out = SmartMosh::new(single_block_config(50))
        .apply(&input(&primary, &secondary, 50), &mut create_rng(1));
    assert_eq!(out.payload.len(), primary.len());
    assert_eq!(out.payload[100], 0xAB);
}

#[test]
fn test_default_config_is_deterministic() {
    let primary: Vec<u8> = (0..40_000u32).map(|i| (i * 7 % 256) as u8).collect();
    let secondary: Vec<u8> = (0..40_000u32).map(|i| (i * 13 % 256) as u8).collect();
    let mut glitch = input(&primary, &secondary, 70);
    glitch.size = SizeClass::Small;

    let a = SmartMosh::default().apply(&glitch, &mut create_rng(99));
    let b = SmartMosh::default().apply(&glitch, &mut create_rng(99));
    assert_eq!(a, b);
    assert_eq!(a.payload.len(), primary.len());
    assert_eq!(a.glitches, 45);
    assert_ne!(a.payload, primary);
}

#[test]
fn test_24_bit_overdrive_pins_to_limits() {
    let codec = crate::codec::Pcm24Codec;
    let primary = codec.encode(&[0; 64]);
    let mut config = single_block_config(64);
    config.volume_reduction = 4.0;

    for (source, limit) in [(8_388_607, 8_388_607), (-8_388_608, -8_388_608)] {
        let secondary = codec.encode(&[source; 64]);
        let mut glitch = input(&primary, &secondary, 100);
        glitch.depth = BitDepth::Pcm24;

        let out = SmartMosh::new(config.clone()).apply(&glitch, &mut create_rng(4));
        assert_eq!(codec.decode(&out.payload), vec![limit; 64]);
    }
}

#[test]
fn test_16_bit_soft_clip_overdrive_pins_to_limits() {
    let mut config = single_block_config(16);
    config.volume_reduction = 4.0;
    config.clip_threshold = 0.75;
    config.clip_damping = 0.3;
    let primary = encode16(&[0; 16]);

    let out = SmartMosh::new(config.clone())
        .apply(&input(&primary, &encode16(&[30_000; 16]), 50), &mut create_rng(1));
    assert_eq!(out.payload, encode16(&[i16::MAX; 16]));

    let out = SmartMosh::new(config)
        .apply(&input(&primary, &encode16(&[-30_000; 16]), 50), &mut create_rng(1));
    assert_eq!(out.payload, encode16(&[i16::MIN; 16]));
}
