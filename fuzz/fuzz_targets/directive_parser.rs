//! Fuzz target for suppression comment classification.
//!
//! Prefixes the input with one of the directive spellings so the fuzzer
//! spends its time past the prefix match.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lintignore_domain::{CodeAliases, parse_directive};

#[derive(Arbitrary, Debug)]
struct Input {
    prefix: u8,
    rest: String,
}

const PREFIXES: &[&str] = &[
    "# noqa",
    "# noqa:",
    "# noqa-file:",
    "# lint-ignore:",
    "# lint-fixme:",
    "#",
];

fuzz_target!(|input: Input| {
    let prefix = PREFIXES[input.prefix as usize % PREFIXES.len()];
    let comment = format!("{prefix}{}", input.rest.replace('\n', " "));
    let aliases: CodeAliases = [("IG00", "IgnoredRule")].into_iter().collect();

    if let Some(directive) = parse_directive(&comment, &aliases) {
        if let Some(codes) = directive.codes() {
            assert!(!codes.is_empty());
            assert!(!codes.contains("IG00"));
        }
        if let Some(reason) = directive.reason() {
            assert!(!reason.trim().is_empty());
        }
    }
});
