#![no_main]

use libfuzzer_sys::fuzz_target;
use wavmosh_spec::MoshConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = MoshConfig::from_json(text) {
        // Validation must report, never panic.
        let _ = config.validate();
        if let Ok(json) = config.to_json_pretty() {
            let _ = serde_json::from_str::<serde_json::Value>(&json);
        }
    }
});
