//! Data types (config + receipts) for lintignore.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.
//! Everything here may cross a thread or process boundary, which is why rich
//! in-worker reports live in `lintignore-domain` and never appear here.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const RESOLUTION_SCHEMA_V1: &str = "lintignore.resolution.v1";

// ── Frozen Vocabulary ──────────────────────────────────────────
pub const CONFIG_FILE_NAME: &str = "lintignore.toml";

/// Code used for violations produced from unused suppression comments when the
/// config does not name one.
pub const DEFAULT_UNUSED_SUPPRESSION_CODE: &str = "UnusedSuppressionRule";

pub const UNUSED_SUPPRESSION_MESSAGE: &str = "Unused lint suppression. This comment is not \
     suppressing lint errors and can be removed.";

/// The syntactic family a suppression comment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    /// `# noqa`
    LineNoqa,
    /// `# noqa: <codes>`
    CodedNoqa,
    /// `# noqa-file: <codes>: <reason>`
    FileNoqa,
    /// `# lint-ignore: <codes>: <reason>`
    LintIgnore,
    /// `# lint-fixme: <codes>: <reason>`
    LintFixme,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::LineNoqa => "line_noqa",
            DirectiveKind::CodedNoqa => "coded_noqa",
            DirectiveKind::FileNoqa => "file_noqa",
            DirectiveKind::LintIgnore => "lint_ignore",
            DirectiveKind::LintFixme => "lint_fixme",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Location of a comment in its source file. Lines are 1-based, columns are
/// 0-based byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceSpan {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// A suppression comment that silenced nothing during a file's analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnusedSuppression {
    pub kind: DirectiveKind,
    pub span: SourceSpan,
    /// Canonical codes named by the comment. Empty for a bare `# noqa`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,
}

/// The plain, serializable form of a lint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportSummary {
    pub file_path: String,
    pub code: String,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// A file whose analysis could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FailureSummary {
    pub file_path: String,
    pub error: String,
}

/// The outcome of resolving one file's violations against its suppressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolutionReceipt {
    pub schema: String,
    pub tool: ToolMeta,
    pub path: String,
    /// Violations that no comment suppressed, in resolution order.
    pub kept: Vec<ReportSummary>,
    pub suppressed: u32,
    pub unused: Vec<UnusedSuppression>,
    /// Set when the file ended inside an unterminated string or bracket and
    /// the trailing statement was mapped best-effort.
    #[serde(default, skip_serializing_if = "is_false")]
    pub degraded: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The on-disk configuration file (`lintignore.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConfigFile {
    /// Include other config files. Paths are relative to this config file's directory.
    /// Later definitions override earlier ones per alias.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    /// Legacy short code -> canonical rule code.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Code assigned to violations raised for unused suppression comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_suppression_code: Option<String>,
}

impl ConfigFile {
    pub fn built_in() -> Self {
        Self::default()
    }

    pub fn unused_suppression_code(&self) -> &str {
        self.unused_suppression_code
            .as_deref()
            .unwrap_or(DEFAULT_UNUSED_SUPPRESSION_CODE)
    }
}
