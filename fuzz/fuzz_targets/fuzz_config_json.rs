//! Fuzz target: `PlantConfig::from_json`
//!
//! Arbitrary override text must never panic, and anything accepted must
//! pass validation again.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantcare::config::PlantConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = PlantConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.pump_duration_ms > 0);
        assert!(config.tick_interval_ms > 0);
    }
});
