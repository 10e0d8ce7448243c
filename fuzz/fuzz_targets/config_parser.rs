#![no_main]

use corrosion_severity::config::EngineConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any input must parse or fail cleanly; accepted configs must hold
    // strictly increasing thresholds
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = EngineConfig::from_toml_str(input) {
            let values = config.labeling.scheme.thresholds().values();
            assert!(values.windows(2).all(|w| w[0] < w[1]));
        }
    }
});
