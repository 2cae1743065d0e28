//! Fuzz target for `lintignore.toml` parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;

use lintignore_domain::CodeAliases;
use lintignore_types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = toml::from_str::<ConfigFile>(text) else {
        return;
    };

    let aliases = CodeAliases::from_config(&config);
    assert_eq!(aliases.len(), config.aliases.len());
    for (legacy, canonical) in &config.aliases {
        assert_eq!(aliases.resolve(legacy), canonical.as_str());
    }
    let _ = config.unused_suppression_code();
});
