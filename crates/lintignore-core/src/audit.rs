//! Turning resolution leftovers into ordinary report records.

use std::path::Path;
use std::sync::Arc;

use lintignore_domain::RuleReport;
use lintignore_types::{
    FailureSummary, ReportSummary, UNUSED_SUPPRESSION_MESSAGE, UnusedSuppression,
};

/// One report per unused suppression, located at the comment's start.
pub fn unused_suppression_reports(
    path: &Path,
    unused: &[UnusedSuppression],
    code: &str,
) -> Vec<ReportSummary> {
    unused
        .iter()
        .map(|u| ReportSummary {
            file_path: path.display().to_string(),
            code: code.to_string(),
            message: UNUSED_SUPPRESSION_MESSAGE.to_string(),
            line: u.span.start_line,
            column: u.span.start_column,
        })
        .collect()
}

/// Same as [`unused_suppression_reports`], as rich reports sharing `source`.
pub(crate) fn unused_suppression_rule_reports(
    path: &Path,
    source: &str,
    unused: &[UnusedSuppression],
    code: &str,
) -> Vec<RuleReport> {
    if unused.is_empty() {
        return Vec::new();
    }
    let source: Arc<str> = Arc::from(source);
    unused
        .iter()
        .map(|u| {
            RuleReport::new(
                path,
                code,
                UNUSED_SUPPRESSION_MESSAGE,
                u.span.start_line,
                u.span.start_column,
                Arc::clone(&source),
            )
        })
        .collect()
}

/// The record for a file whose resolution failed.
pub fn failure_receipt(path: &Path, error: &anyhow::Error) -> FailureSummary {
    FailureSummary {
        file_path: path.display().to_string(),
        error: format!("{error:#}"),
    }
}
