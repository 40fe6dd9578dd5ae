//! Fuzz target for naming config parsing.
//!
//! Feeds arbitrary UTF-8 to the YAML config parser and, when it parses,
//! to validation and an assigner built from it.

#![no_main]

use asinpack::assign::VariantAssigner;
use asinpack::naming::NamingConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(config) = NamingConfig::from_yaml_str(text) else {
        return;
    };

    if config.validate().is_ok() {
        let assigner = VariantAssigner::with_config(&config);
        let _ = assigner.labels(32);
    }
});
