//! Proptest strategies for generating valid test inputs.
//!
//! Strategies are constructive: directive comments are assembled from
//! valid parts rather than filtered out of random text.
//!
//! # Bounds
//!
//! - Max lines per generated source: 30
//! - Max codes per directive: 3
//! - Max reports per file: 40

use std::sync::Arc;

use lintignore_domain::RuleReport;
use lintignore_types::{
    ConfigFile, DirectiveKind, RESOLUTION_SCHEMA_V1, ReportSummary, ResolutionReceipt, SourceSpan,
    ToolMeta, UnusedSuppression,
};
use proptest::prelude::*;

// =============================================================================
// Constants for bounding generated data
// =============================================================================

/// Maximum number of lines in a generated source file
pub const MAX_SOURCE_LINES: usize = 30;

/// Maximum number of codes in one directive
pub const MAX_CODES_PER_DIRECTIVE: usize = 3;

/// Maximum number of reports raised against one file
pub const MAX_REPORTS: usize = 40;

/// The rule codes generated comments and reports draw from. Small so that
/// comments and reports collide often.
pub const CODES: &[&str] = &["RuleA", "RuleB", "RuleC", "IG00"];

// =============================================================================
// Codes and directives
// =============================================================================

pub fn arb_code() -> impl Strategy<Value = String> {
    prop::sample::select(CODES).prop_map(str::to_string)
}

pub fn arb_codes() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_code(), 1..=MAX_CODES_PER_DIRECTIVE)
}

pub fn arb_reason() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 ,.']{0,30}").expect("valid regex")
}

pub fn arb_directive_kind() -> impl Strategy<Value = DirectiveKind> {
    prop_oneof![
        Just(DirectiveKind::LineNoqa),
        Just(DirectiveKind::CodedNoqa),
        Just(DirectiveKind::FileNoqa),
        Just(DirectiveKind::LintIgnore),
        Just(DirectiveKind::LintFixme),
    ]
}

/// A well-formed directive comment together with the kind it must parse as.
pub fn arb_directive_comment() -> impl Strategy<Value = (String, DirectiveKind)> {
    (arb_directive_kind(), arb_codes(), arb_reason()).prop_map(|(kind, codes, reason)| {
        let codes = codes.join(", ");
        let text = match kind {
            DirectiveKind::LineNoqa => "# noqa".to_string(),
            DirectiveKind::CodedNoqa => format!("# noqa: {codes}"),
            DirectiveKind::FileNoqa => format!("# noqa-file: {codes}: {reason}"),
            DirectiveKind::LintIgnore => format!("# lint-ignore: {codes}: {reason}"),
            DirectiveKind::LintFixme => format!("# lint-fixme: {codes}: {reason}"),
        };
        (text, kind)
    })
}

// =============================================================================
// Sources
// =============================================================================

/// One physical line of Python-like source.
pub fn arb_python_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-z_][a-z0-9_]{0,8}\\(\\)").expect("valid regex"),
        1 => Just("call(".to_string()),
        1 => Just("    arg,".to_string()),
        1 => Just(")".to_string()),
        1 => Just("text = '''".to_string()),
        1 => Just("'''".to_string()),
        1 => Just("total = 1 + \\".to_string()),
        1 => Just("# lint: continued".to_string()),
        1 => Just(String::new()),
        3 => arb_directive_comment().prop_map(|(text, _)| text),
        2 => (arb_code(), any::<bool>()).prop_map(|(code, bare)| {
            if bare {
                "value()  # noqa".to_string()
            } else {
                format!("value()  # noqa: {code}")
            }
        }),
    ]
}

pub fn arb_python_source() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_python_line(), 0..MAX_SOURCE_LINES).prop_map(|lines| {
        let mut source = lines.join("\n");
        source.push('\n');
        source
    })
}

/// `(line, column, code)` triples, lines within `1..=max_line`.
pub fn arb_report_locations(max_line: u32) -> impl Strategy<Value = Vec<(u32, u32, String)>> {
    prop::collection::vec((1..=max_line.max(1), 0u32..20, arb_code()), 0..MAX_REPORTS)
}

/// A source file and reports raised against its lines.
pub fn arb_file_with_reports() -> impl Strategy<Value = (String, Vec<RuleReport>)> {
    arb_python_source().prop_flat_map(|source| {
        let max_line = source.lines().count() as u32 + 1;
        let shared: Arc<str> = Arc::from(source.as_str());
        arb_report_locations(max_line).prop_map(move |locations| {
            let reports = locations
                .into_iter()
                .map(|(line, column, code)| {
                    RuleReport::new("gen.py", code, "generated", line, column, Arc::clone(&shared))
                })
                .collect();
            (shared.to_string(), reports)
        })
    })
}

// =============================================================================
// DTOs
// =============================================================================

pub fn arb_file_path() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,8}(/[a-z][a-z0-9_]{0,8}){0,3}\\.py")
        .expect("valid regex")
}

pub fn arb_source_span() -> impl Strategy<Value = SourceSpan> {
    (1u32..500, 0u32..120, 0u32..3, 1u32..80).prop_map(|(line, column, extra, len)| SourceSpan {
        start_line: line,
        start_column: column,
        end_line: line + extra,
        end_column: column + len,
    })
}

pub fn arb_unused_suppression() -> impl Strategy<Value = UnusedSuppression> {
    (
        arb_directive_kind().prop_filter("not tracked", |k| *k != DirectiveKind::FileNoqa),
        arb_source_span(),
        arb_codes(),
    )
        .prop_map(|(kind, span, codes)| UnusedSuppression {
            kind,
            span,
            codes: if kind == DirectiveKind::LineNoqa { vec![] } else { codes },
        })
}

pub fn arb_report_summary() -> impl Strategy<Value = ReportSummary> {
    (arb_file_path(), arb_code(), arb_reason(), 1u32..500, 0u32..120).prop_map(
        |(file_path, code, message, line, column)| ReportSummary {
            file_path,
            code,
            message,
            line,
            column,
        },
    )
}

pub fn arb_resolution_receipt() -> impl Strategy<Value = ResolutionReceipt> {
    (
        arb_file_path(),
        prop::collection::vec(arb_report_summary(), 0..8),
        0u32..100,
        prop::collection::vec(arb_unused_suppression(), 0..5),
        any::<bool>(),
    )
        .prop_map(|(path, kept, suppressed, unused, degraded)| ResolutionReceipt {
            schema: RESOLUTION_SCHEMA_V1.to_string(),
            tool: ToolMeta {
                name: "lintignore".to_string(),
                version: "0.1.0".to_string(),
            },
            path,
            kept,
            suppressed,
            unused,
            degraded,
        })
}

pub fn arb_config_file() -> impl Strategy<Value = ConfigFile> {
    (
        prop::collection::vec(arb_file_path().prop_map(|p| p.replace(".py", ".toml")), 0..3),
        prop::collection::btree_map(
            prop::string::string_regex("[A-Z]{2}[0-9]{2}").expect("valid regex"),
            arb_code(),
            0..5,
        ),
        prop::option::of(arb_code()),
    )
        .prop_map(|(includes, aliases, unused_suppression_code)| ConfigFile {
            includes,
            aliases,
            unused_suppression_code,
        })
}
