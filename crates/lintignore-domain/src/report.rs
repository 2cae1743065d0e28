//! Report model seen by the suppression engine.
//!
//! [`RuleReport`] is the rich form a rule produces while a file is being
//! analysed; it shares the file's source text and never leaves the worker.
//! Everything that crosses a thread boundary is a plain summary record from
//! `lintignore-types`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lintignore_types::{FailureSummary, ReportSummary};

/// The view of a lint report the suppression index needs.
pub trait Violation {
    /// 1-based physical line.
    fn line(&self) -> u32;
    /// 0-based byte column.
    fn column(&self) -> u32;
    /// Rule code as the rule reports it; may be a legacy alias.
    fn code(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub file_path: PathBuf,
    pub code: String,
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// Source text of the file the report was raised in.
    pub source: Arc<str>,
}

impl RuleReport {
    pub fn new(
        file_path: impl Into<PathBuf>,
        code: impl Into<String>,
        message: impl Into<String>,
        line: u32,
        column: u32,
        source: Arc<str>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            code: code.into(),
            message: message.into(),
            line,
            column,
            source,
        }
    }

    /// Text of the physical line the report points at, without terminator.
    pub fn source_line(&self) -> Option<&str> {
        let idx = self.line.checked_sub(1)? as usize;
        self.source
            .split('\n')
            .nth(idx)
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            file_path: self.file_path.display().to_string(),
            code: self.code.clone(),
            message: self.message.clone(),
            line: self.line,
            column: self.column,
        }
    }
}

impl Violation for RuleReport {
    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }

    fn code(&self) -> &str {
        &self.code
    }
}

impl Violation for ReportSummary {
    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }

    fn code(&self) -> &str {
        &self.code
    }
}

/// Builds the success-side report records for one file.
pub trait SuccessReport: Sized {
    fn create_reports(path: &Path, reports: &[RuleReport]) -> Vec<Self>;
}

/// Builds the report records for a file whose analysis failed.
pub trait FailureReport: Sized {
    fn create_reports(path: &Path, error: &str) -> Vec<Self>;
}

impl SuccessReport for ReportSummary {
    fn create_reports(path: &Path, reports: &[RuleReport]) -> Vec<Self> {
        reports
            .iter()
            .map(|r| ReportSummary {
                file_path: path.display().to_string(),
                ..r.summary()
            })
            .collect()
    }
}

impl FailureReport for FailureSummary {
    fn create_reports(path: &Path, error: &str) -> Vec<Self> {
        vec![FailureSummary {
            file_path: path.display().to_string(),
            error: error.to_string(),
        }]
    }
}
