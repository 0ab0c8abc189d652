#![no_main]

use libfuzzer_sys::fuzz_target;
use qwifi_stats::config::ValidationConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and validating arbitrary TOML must never panic
        if let Ok(config) = ValidationConfig::from_toml_str(input) {
            let _ = config.validate();
            for plan in config.metrics() {
                let _ = plan.baseline.validate();
                let _ = config.seed_for(plan.name, qwifi_stats::sampling::Condition::Baseline);
            }
        }
    }
});
