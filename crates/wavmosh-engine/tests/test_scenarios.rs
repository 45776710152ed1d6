//! End-to-end scenarios through the engine.

use pretty_assertions::assert_eq;
use wavmosh_engine::energy::{find_interesting_points, score_windows};
use wavmosh_engine::wav::{split_canonical, write_wav_to_vec, WavFormat};
use wavmosh_engine::{codec_for, BitDepth, MixEngine, MoshRequest, MoshWarning};
use wavmosh_spec::{GlitchParameters, MoshConfig, SizeClass, SizeProfile, SizeTable, Strategy};

const ONE_SECOND_16: usize = 44_100 * 2;

fn wav(depth: BitDepth, payload: &[u8]) -> Vec<u8> {
    write_wav_to_vec(&WavFormat::mono(44_100, depth), payload)
}

/// A loud, busy 16-bit test signal.
fn square_wave(samples: usize, amplitude: i16, period: usize) -> Vec<u8> {
    (0..samples)
        .flat_map(|i| {
            let value = if (i / period) % 2 == 0 { amplitude } else { -amplitude };
            value.to_le_bytes()
        })
        .collect()
}

// ============================================================================
// Hex swap
// ============================================================================

#[test]
fn test_hex_swap_half_intensity_fraction() {
    let primary = wav(BitDepth::Pcm16, &vec![0x00u8; ONE_SECOND_16]);
    let secondary = wav(BitDepth::Pcm16, &vec![0xFFu8; ONE_SECOND_16]);
    let request = MoshRequest::from_files(&primary, &secondary).unwrap();
    let params = GlitchParameters::new(50)
        .with_strategy(Strategy::HexSwap)
        .with_seed(2024);

    let engine = MixEngine::default();
    let out = engine.run_seeded(&request, &params);
    let swapped = out.payload.iter().filter(|&&b| b == 0xFF).count();
    let fraction = swapped as f64 / out.payload.len() as f64;

    assert_eq!(out.payload.len(), ONE_SECOND_16);
    assert!((fraction - 0.5).abs() <= 0.03, "fraction = {}", fraction);
    assert_eq!(out.glitches_applied, swapped);

    let again = engine.run_seeded(&request, &params);
    assert_eq!(again.payload, out.payload);
    assert_eq!(again.pcm_hash, out.pcm_hash);

    let other_seed = engine.run_seeded(&request, &params.with_seed(2025));
    assert_ne!(other_seed.payload, out.payload);
}

// ============================================================================
// Smart mosh
// ============================================================================

#[test]
fn test_smart_mosh_zero_glitches_round_trips() {
    let mut config = MoshConfig::default();
    let zero = SizeProfile::new(4_000, 15_000, 50, 0);
    config.smart_mosh.sizes = SizeTable {
        small: zero,
        medium: zero,
        large: zero,
    };
    let engine = MixEngine::new(config).unwrap();

    for depth in [BitDepth::Pcm16, BitDepth::Pcm24] {
        let payload: Vec<u8> = (0..9_000u32).map(|i| (i * 31 % 256) as u8).collect();
        let primary = wav(depth, &payload);
        let secondary = wav(depth, &vec![0x55u8; 9_000]);
        let request = MoshRequest::from_files(&primary, &secondary).unwrap();

        let out = engine.run_seeded(&request, &GlitchParameters::new(0).with_seed(1));
        assert_eq!(out.payload, payload);
        assert_eq!(out.glitches_applied, 0);
        assert_eq!(out.to_wav_bytes(), primary);
    }
}

/// Default tuning with the secondary boosted well past full scale.
fn overdriven_engine(clip_threshold: f64) -> MixEngine {
    let mut config = MoshConfig::default();
    config.smart_mosh.volume_reduction = 4.0;
    config.smart_mosh.clip_threshold = clip_threshold;
    MixEngine::new(config).unwrap()
}

fn constant(depth: BitDepth, value: i32, samples: usize) -> Vec<u8> {
    codec_for(depth).encode(&vec![value; samples])
}

#[test]
fn test_smart_mosh_overdrive_clamps_to_full_scale() {
    // With the knee at full scale, every boosted sample lands past the
    // limit and must pin to it. A wrapped value would flip sign.
    let engine = overdriven_engine(1.0);
    for depth in [BitDepth::Pcm16, BitDepth::Pcm24] {
        let codec = codec_for(depth);
        for limit in [codec.max_value(), codec.min_value()] {
            let primary = wav(depth, &constant(depth, limit, 30_000));
            let secondary = wav(depth, &constant(depth, limit, 30_000));
            let request = MoshRequest::from_files(&primary, &secondary).unwrap();

            for size in [SizeClass::Small, SizeClass::Medium, SizeClass::Large] {
                let params = GlitchParameters::new(100).with_size(size).with_seed(11);
                let out = engine.run_seeded(&request, &params);
                assert!(out.glitches_applied > 0);
                let samples = codec.decode(&out.payload);
                assert_eq!(samples.len(), 30_000);
                assert!(
                    samples.iter().all(|&s| s == limit),
                    "{:?} {} {}: expected every sample at {}",
                    depth,
                    size,
                    limit,
                    limit
                );
            }
        }
    }
}

#[test]
fn test_smart_mosh_soft_clip_keeps_sign() {
    // Below-threshold knee: glitched samples are compressed under full
    // scale but never change sign.
    let engine = overdriven_engine(0.75);
    for depth in [BitDepth::Pcm16, BitDepth::Pcm24] {
        let codec = codec_for(depth);
        let primary = wav(depth, &constant(depth, codec.max_value(), 30_000));
        let secondary = wav(depth, &constant(depth, codec.max_value(), 30_000));
        let request = MoshRequest::from_files(&primary, &secondary).unwrap();

        let out = engine.run_seeded(&request, &GlitchParameters::new(90).with_seed(3));
        assert_eq!(out.bit_depth, depth);
        let samples = codec.decode(&out.payload);
        assert!(samples.iter().all(|&s| s > 0), "{:?}: sign flipped", depth);
        assert!(samples.iter().any(|&s| s < codec.max_value()));
    }
}

#[test]
fn test_block_preset_runs() {
    let primary = wav(BitDepth::Pcm16, &square_wave(60_000, 12_000, 30));
    let secondary = wav(BitDepth::Pcm16, &square_wave(60_000, 20_000, 90));
    let request = MoshRequest::from_files(&primary, &secondary).unwrap();
    let engine = MixEngine::from_preset(wavmosh_spec::Preset::Block);

    let out = engine.run_seeded(&request, &GlitchParameters::new(100).with_size(SizeClass::Small).with_seed(8));
    assert_eq!(out.payload.len(), 120_000);
    assert_eq!(out.glitches_applied, 35);
    assert_ne!(out.payload, request.primary);
}

// ============================================================================
// Header corruption
// ============================================================================

#[test]
fn test_header_corrupt_preserves_riff_prefix() {
    let primary = wav(BitDepth::Pcm16, &[3u8; 400]);
    let secondary = wav(BitDepth::Pcm16, &[4u8; 400]);
    let request = MoshRequest::from_files(&primary, &secondary).unwrap();
    let params = GlitchParameters::new(100)
        .with_strategy(Strategy::HeaderCorrupt)
        .with_seed(5);

    let out = MixEngine::default().run_seeded(&request, &params);
    let bytes = out.to_wav_bytes();
    assert_eq!(bytes.len(), primary.len());
    assert_eq!(&bytes[..12], &primary[..12]);
    assert_eq!(&bytes[44..], &primary[44..]);
    assert_eq!(out.glitches_applied, 16);
    assert!(split_canonical(&bytes).is_ok());
}

// ============================================================================
// Policies
// ============================================================================

#[test]
fn test_unsupported_depth_falls_back() {
    let mut primary = wav(BitDepth::Pcm16, &square_wave(5_000, 9_000, 20));
    primary[34..36].copy_from_slice(&32u16.to_le_bytes());
    let secondary = wav(BitDepth::Pcm16, &square_wave(5_000, 3_000, 20));
    let request = MoshRequest::from_files(&primary, &secondary).unwrap();

    let out = MixEngine::default().run_seeded(&request, &GlitchParameters::new(50).with_size(SizeClass::Small));
    assert_eq!(request.bit_depth, 32);
    assert_eq!(out.bit_depth, BitDepth::Pcm16);
    assert_eq!(out.warnings, vec![MoshWarning::UnsupportedBitDepth { bits: 32 }]);
    assert_eq!(out.payload.len(), 10_000);
}

#[test]
fn test_empty_secondary_leaves_primary() {
    let payload = square_wave(2_000, 1_000, 10);
    let primary = wav(BitDepth::Pcm16, &payload);
    let secondary = wav(BitDepth::Pcm16, &[]);
    let request = MoshRequest::from_files(&primary, &secondary).unwrap();

    for strategy in Strategy::ALL {
        if strategy == Strategy::HeaderCorrupt {
            continue;
        }
        let out = MixEngine::default().run_seeded(&request, &GlitchParameters::new(80).with_strategy(strategy));
        assert_eq!(out.payload, payload, "{}", strategy);
    }
}

// ============================================================================
// Energy analysis
// ============================================================================

#[test]
fn test_discontinuity_scores_highest() {
    // 0x4040 keeps both bytes equal, so the flat regions score zero.
    let mut signal = vec![0i16; 50_000];
    for s in signal.iter_mut().skip(30_100) {
        *s = 0x4040;
    }
    let bytes: Vec<u8> = signal.iter().flat_map(|s| s.to_le_bytes()).collect();

    // 100_000 bytes over 10 points gives 5_000-byte windows. The jump at byte
    // 60_200 falls inside the scored prefix of the window at 60_000.
    let scores = score_windows(&bytes, 10);
    assert_eq!(scores[0].position, 60_000);
    assert_eq!(scores[0].energy, 0x40);
    assert!(scores[1..].iter().all(|p| p.energy < scores[0].energy));
    assert_eq!(find_interesting_points(&bytes, 10)[0], 60_000);
}
