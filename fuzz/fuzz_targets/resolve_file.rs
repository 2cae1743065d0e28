//! Fuzz target for file-level resolution.
//!
//! Structured input: a source built from fuzzer-chosen lines plus reports
//! pointing into it. Every report must come out either kept or suppressed.

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lintignore_core::{ResolvePlan, resolve_file};
use lintignore_domain::RuleReport;

#[derive(Arbitrary, Debug)]
struct FuzzFile {
    lines: Vec<String>,
    reports: Vec<(u8, u8, u8)>,
}

const CODES: &[&str] = &["RuleA", "RuleB", "IG00"];

fuzz_target!(|input: FuzzFile| {
    let source = input.lines.join("\n");
    let shared: Arc<str> = Arc::from(source.as_str());
    let reports: Vec<RuleReport> = input
        .reports
        .iter()
        .map(|&(line, column, code)| {
            RuleReport::new(
                "fuzz.py",
                CODES[code as usize % CODES.len()],
                "fuzz",
                u32::from(line) + 1,
                u32::from(column),
                Arc::clone(&shared),
            )
        })
        .collect();
    let total = reports.len() as u32;

    let plan = ResolvePlan::new("fuzz.py").with_unused_reports(true);
    let resolution = resolve_file(&plan, &source, reports).expect("resolution never fails");
    assert_eq!(resolution.kept.len() as u32 + resolution.suppressed, total);
    let _ = resolution.receipt();
});
