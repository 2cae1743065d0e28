#![no_main]

use libfuzzer_sys::fuzz_target;

use lintignore_domain::LineMapping;
use lintignore_tokens::{TokenKind, tokenize};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let tokens = tokenize(&s);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndMarker));

    let mapping = LineMapping::compute(&tokens).expect("tokenize never returns an empty stream");
    for line in 1..=mapping.line_count() {
        assert!(mapping.logical_line(line).is_some(), "line {line} unmapped");
    }
});
