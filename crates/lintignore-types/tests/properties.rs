//! Property-based tests for lintignore-types.
//!
//! Every generated config and receipt must validate against the JSON schema
//! schemars derives for its type.

use std::collections::BTreeMap;

use jsonschema::JSONSchema;
use lintignore_types::{
    ConfigFile, DirectiveKind, RESOLUTION_SCHEMA_V1, ReportSummary, ResolutionReceipt, SourceSpan,
    ToolMeta, UnusedSuppression,
};
use proptest::prelude::*;

fn compile<T: schemars::JsonSchema>() -> JSONSchema {
    let schema = serde_json::to_value(schemars::schema_for!(T)).expect("schema serializes");
    JSONSchema::compile(&schema).expect("valid JSON schema")
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_code() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Za-z0-9]{1,15}").expect("valid regex")
}

fn arb_directive_kind() -> impl Strategy<Value = DirectiveKind> {
    prop_oneof![
        Just(DirectiveKind::LineNoqa),
        Just(DirectiveKind::CodedNoqa),
        Just(DirectiveKind::FileNoqa),
        Just(DirectiveKind::LintIgnore),
        Just(DirectiveKind::LintFixme),
    ]
}

fn arb_span() -> impl Strategy<Value = SourceSpan> {
    (1u32..500, 0u32..3, 0u32..120, 0u32..120).prop_map(|(line, extra, start, len)| SourceSpan {
        start_line: line,
        start_column: start,
        end_line: line + extra,
        end_column: start + len,
    })
}

fn arb_unused() -> impl Strategy<Value = UnusedSuppression> {
    (
        arb_directive_kind(),
        arb_span(),
        prop::collection::vec(arb_code(), 0..4),
    )
        .prop_map(|(kind, span, codes)| UnusedSuppression { kind, span, codes })
}

fn arb_summary() -> impl Strategy<Value = ReportSummary> {
    (arb_code(), "[a-z ]{0,40}", 1u32..500, 0u32..120).prop_map(|(code, message, line, column)| {
        ReportSummary {
            file_path: "pkg/module.py".to_string(),
            code,
            message,
            line,
            column,
        }
    })
}

fn arb_receipt() -> impl Strategy<Value = ResolutionReceipt> {
    (
        prop::collection::vec(arb_summary(), 0..6),
        0u32..50,
        prop::collection::vec(arb_unused(), 0..6),
        any::<bool>(),
    )
        .prop_map(|(kept, suppressed, unused, degraded)| ResolutionReceipt {
            schema: RESOLUTION_SCHEMA_V1.to_string(),
            tool: ToolMeta {
                name: "lintignore".to_string(),
                version: "0.1.0".to_string(),
            },
            path: "pkg/module.py".to_string(),
            kept,
            suppressed,
            unused,
            degraded,
        })
}

fn arb_config() -> impl Strategy<Value = ConfigFile> {
    (
        prop::collection::vec("[a-z]{1,8}\\.toml", 0..3),
        prop::collection::btree_map(arb_code(), arb_code(), 0..6),
        prop::option::of(arb_code()),
    )
        .prop_map(
            |(includes, aliases, unused_suppression_code): (
                Vec<String>,
                BTreeMap<String, String>,
                Option<String>,
            )| ConfigFile {
                includes,
                aliases,
                unused_suppression_code,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn property_receipts_validate_against_schema(receipt in arb_receipt()) {
        let schema = compile::<ResolutionReceipt>();
        let json = serde_json::to_value(&receipt).expect("receipt serializes");
        prop_assert!(schema.is_valid(&json));

        let back: ResolutionReceipt = serde_json::from_value(json).expect("receipt deserializes");
        prop_assert_eq!(back, receipt);
    }

    #[test]
    fn property_configs_validate_against_schema(config in arb_config()) {
        let schema = compile::<ConfigFile>();
        let json = serde_json::to_value(&config).expect("config serializes");
        prop_assert!(schema.is_valid(&json));
    }
}

#[test]
fn receipt_missing_schema_field_is_rejected() {
    let schema = compile::<ResolutionReceipt>();
    let json = serde_json::json!({
        "tool": { "name": "lintignore", "version": "0.1.0" },
        "path": "a.py",
        "kept": [],
        "suppressed": 0,
        "unused": []
    });
    assert!(!schema.is_valid(&json));
}
