use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use lintignore_domain::{
    CodeAliases, FailureReport, LineMapping, RuleReport, SuccessReport, SuppressionIndex,
    parse_suppression_comments,
};
use lintignore_tokens::tokenize;
use lintignore_types::{
    ConfigFile, RESOLUTION_SCHEMA_V1, ReportSummary, ResolutionReceipt, ToolMeta,
    UnusedSuppression,
};

use crate::audit::unused_suppression_rule_reports;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvePlan {
    pub path: PathBuf,
    pub aliases: CodeAliases,
    /// Raise a report for every line-scoped suppression comment that
    /// silenced nothing.
    pub report_unused: bool,
    pub unused_suppression_code: String,
}

impl ResolvePlan {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(path, &ConfigFile::built_in())
    }

    pub fn from_config(path: impl Into<PathBuf>, config: &ConfigFile) -> Self {
        Self {
            path: path.into(),
            aliases: CodeAliases::from_config(config),
            report_unused: false,
            unused_suppression_code: config.unused_suppression_code().to_string(),
        }
    }

    pub fn with_unused_reports(mut self, enabled: bool) -> Self {
        self.report_unused = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResolution {
    pub path: PathBuf,
    /// Reports no comment suppressed, in `(line, column, discovery)` order.
    pub kept: Vec<RuleReport>,
    pub suppressed: u32,
    pub unused: Vec<UnusedSuppression>,
    /// The file ended inside an open statement and its tail was mapped
    /// best-effort.
    pub degraded: bool,
}

impl FileResolution {
    pub fn receipt(&self) -> ResolutionReceipt {
        ResolutionReceipt {
            schema: RESOLUTION_SCHEMA_V1.to_string(),
            tool: ToolMeta {
                name: "lintignore".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            path: self.path.display().to_string(),
            kept: self.kept.iter().map(RuleReport::summary).collect(),
            suppressed: self.suppressed,
            unused: self.unused.clone(),
            degraded: self.degraded,
        }
    }
}

/// Resolve one file's reports against the suppression comments in `source`.
///
/// Reports are queried in ascending `(line, column)` order with ties kept in
/// the order they were raised, so which comment gets credited does not
/// depend on the order the rule engine produced them in.
///
/// # Errors
///
/// Only when the line mapper rejects the token stream. [`tokenize`] always
/// ends with an end marker, so source text that tokenizes at all resolves.
pub fn resolve_file(
    plan: &ResolvePlan,
    source: &str,
    reports: Vec<RuleReport>,
) -> anyhow::Result<FileResolution> {
    let tokens = tokenize(source);
    let mapping = LineMapping::compute(&tokens)
        .with_context(|| format!("map logical lines of '{}'", plan.path.display()))?;
    let comments = parse_suppression_comments(&tokens, &mapping, &plan.aliases);
    let mut index = SuppressionIndex::build(comments, &plan.aliases);

    let mut ordered: Vec<(usize, RuleReport)> = reports.into_iter().enumerate().collect();
    ordered.sort_by_key(|(discovery, r)| (r.line, r.column, *discovery));

    let mut kept = Vec::with_capacity(ordered.len());
    let mut suppressed = 0u32;
    for (_, report) in ordered {
        if index.should_ignore(&report) {
            suppressed = suppressed.saturating_add(1);
        } else {
            kept.push(report);
        }
    }

    let unused = index.into_unused();
    debug!(
        path = %plan.path.display(),
        kept = kept.len(),
        suppressed,
        unused = unused.len(),
        degraded = mapping.is_degraded(),
        "resolved file"
    );

    Ok(FileResolution {
        path: plan.path.clone(),
        kept,
        suppressed,
        unused,
        degraded: mapping.is_degraded(),
    })
}

/// Resolve a file and build the worker's outgoing records.
///
/// Unused suppressions are appended as ordinary reports when the plan asks
/// for them. A failure is turned into failure records instead of an error so
/// one bad file never aborts a batch.
pub fn collect_reports<S, F>(
    plan: &ResolvePlan,
    source: &str,
    reports: Vec<RuleReport>,
) -> Result<Vec<S>, Vec<F>>
where
    S: SuccessReport,
    F: FailureReport,
{
    into_records(plan, source, resolve_file(plan, source, reports))
}

fn into_records<S, F>(
    plan: &ResolvePlan,
    source: &str,
    outcome: anyhow::Result<FileResolution>,
) -> Result<Vec<S>, Vec<F>>
where
    S: SuccessReport,
    F: FailureReport,
{
    match outcome {
        Ok(resolution) => {
            let mut out = resolution.kept;
            if plan.report_unused {
                out.extend(unused_suppression_rule_reports(
                    &plan.path,
                    source,
                    &resolution.unused,
                    &plan.unused_suppression_code,
                ));
            }
            Ok(S::create_reports(&plan.path, &out))
        }
        Err(err) => Err(F::create_reports(&plan.path, &format!("{err:#}"))),
    }
}

/// Serialize a receipt the way it is written to disk.
pub fn render_receipt_json(receipt: &ResolutionReceipt) -> anyhow::Result<String> {
    serde_json::to_string_pretty(receipt).context("serialize resolution receipt")
}

/// Convenience for callers that only want plain summaries.
pub fn resolve_to_summaries(
    path: &Path,
    source: &str,
    reports: Vec<RuleReport>,
    aliases: &CodeAliases,
) -> anyhow::Result<Vec<ReportSummary>> {
    let plan = ResolvePlan {
        path: path.to_path_buf(),
        aliases: aliases.clone(),
        report_unused: false,
        unused_suppression_code: ConfigFile::built_in().unused_suppression_code().to_string(),
    };
    let resolution = resolve_file(&plan, source, reports)?;
    Ok(resolution.kept.iter().map(RuleReport::summary).collect())
}
