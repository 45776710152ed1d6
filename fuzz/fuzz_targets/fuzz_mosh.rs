#![no_main]

use libfuzzer_sys::fuzz_target;
use wavmosh_engine::{MixEngine, MoshRequest};
use wavmosh_spec::{GlitchParameters, SizeClass, Strategy};

// Layout: [strategy, intensity, size, depth selector, seed x4, split x2, data...]
fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }
    let strategy = Strategy::ALL[data[0] as usize % Strategy::ALL.len()];
    let size = SizeClass::from_level(data[2] as i64 % 3 + 1);
    let bits = match data[3] % 4 {
        0 => 16,
        1 => 24,
        2 => 8,
        _ => 32,
    };
    let seed = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let rest = &data[10..];
    let split = (u16::from_le_bytes([data[8], data[9]]) as usize).min(rest.len());
    let (primary, secondary) = rest.split_at(split);

    let header = [0u8; 44];
    let request = MoshRequest {
        header: &header,
        primary,
        secondary,
        bit_depth: bits,
    };
    let params = GlitchParameters::new(data[1] as u32)
        .with_strategy(strategy)
        .with_size(size)
        .with_seed(seed);

    let output = MixEngine::default().run_seeded(&request, &params);
    assert_eq!(output.payload.len(), primary.len());
    assert_eq!(output.header.len(), header.len());
});
