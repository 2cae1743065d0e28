//! The per-file suppression index.
//!
//! Built once from a file's suppression comments, then queried once per
//! report in ascending `(line, column)` order. Each query that a comment
//! satisfies is recorded against that comment, which is what makes
//! [`SuppressionIndex::unused_comments`] possible.

use std::collections::{BTreeMap, BTreeSet};

use lintignore_tokens::Token;
use lintignore_types::UnusedSuppression;
use tracing::debug;

use crate::aliases::CodeAliases;
use crate::comments::{ApplicableLines, SuppressionComment, parse_suppression_comments};
use crate::line_mapping::{LineMapping, SuppressError};
use crate::report::Violation;

/// Position of a comment in the index's arena; also its source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommentId(usize);

impl CommentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One suppressed report, as credited to the comment that suppressed it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViolationId {
    pub line: u32,
    /// Canonical code.
    pub code: String,
    /// Query order within the index; distinguishes repeated `(line, code)`.
    pub sequence: u64,
}

#[derive(Debug)]
pub struct SuppressionIndex<'a> {
    aliases: &'a CodeAliases,
    comments: Vec<SuppressionComment>,
    /// `used_by[id]` is the usage set of `comments[id]`.
    used_by: Vec<BTreeSet<ViolationId>>,
    /// Physical line -> comments covering it, highest priority first.
    by_line: BTreeMap<u32, Vec<CommentId>>,
    file_wide: Vec<CommentId>,
    next_sequence: u64,
}

impl<'a> SuppressionIndex<'a> {
    /// Index `comments`, which must be in source order.
    pub fn build(comments: Vec<SuppressionComment>, aliases: &'a CodeAliases) -> Self {
        let mut by_line: BTreeMap<u32, Vec<CommentId>> = BTreeMap::new();
        let mut file_wide = Vec::new();

        for (idx, comment) in comments.iter().enumerate() {
            let id = CommentId(idx);
            match &comment.applicable {
                ApplicableLines::WholeFile => file_wide.push(id),
                ApplicableLines::Range(range) => {
                    for line in range.clone() {
                        by_line.entry(line).or_default().push(id);
                    }
                }
            }
        }

        for ids in by_line.values_mut() {
            ids.sort_by_key(|id| (comments[id.0].directive.priority(), *id));
        }

        debug!(
            comments = comments.len(),
            file_wide = file_wide.len(),
            lines = by_line.len(),
            "built suppression index"
        );

        Self {
            aliases,
            used_by: vec![BTreeSet::new(); comments.len()],
            comments,
            by_line,
            file_wide,
            next_sequence: 0,
        }
    }

    /// Map lines, collect comments and index them in one go.
    pub fn compute(tokens: &[Token], aliases: &'a CodeAliases) -> Result<Self, SuppressError> {
        let mapping = LineMapping::compute(tokens)?;
        let comments = parse_suppression_comments(tokens, &mapping, aliases);
        Ok(Self::build(comments, aliases))
    }

    /// Decide whether `report` is silenced, crediting the comment that
    /// silenced it.
    ///
    /// File-wide suppressions win outright and are not credited.
    pub fn should_ignore<V: Violation + ?Sized>(&mut self, report: &V) -> bool {
        let aliases = self.aliases;
        let code = aliases.resolve(report.code());
        let line = report.line();
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if self
            .file_wide
            .iter()
            .any(|id| self.comments[id.0].directive.suppresses(code))
        {
            debug!(line, code, "suppressed by file-wide comment");
            return true;
        }

        let Some(ids) = self.by_line.get(&line) else {
            return false;
        };
        let Some(&id) = ids
            .iter()
            .find(|id| self.comments[id.0].directive.suppresses(code))
        else {
            return false;
        };

        debug!(
            line,
            code,
            comment_line = self.comments[id.0].first_line(),
            "suppressed"
        );
        self.used_by[id.0].insert(ViolationId {
            line,
            code: code.to_string(),
            sequence,
        });
        true
    }

    pub fn comments(&self) -> &[SuppressionComment] {
        &self.comments
    }

    pub fn comment(&self, id: CommentId) -> Option<&SuppressionComment> {
        self.comments.get(id.0)
    }

    /// All comments with their ids, in source order.
    pub fn iter(&self) -> impl Iterator<Item = (CommentId, &SuppressionComment)> {
        self.comments
            .iter()
            .enumerate()
            .map(|(idx, c)| (CommentId(idx), c))
    }

    /// The reports `id` has suppressed so far.
    pub fn used_by(&self, id: CommentId) -> Option<&BTreeSet<ViolationId>> {
        self.used_by.get(id.0)
    }

    /// Line-scoped comments that have not suppressed anything, in source
    /// order. File-wide comments are never listed since they are not
    /// credited.
    pub fn unused_comments(&self) -> Vec<&SuppressionComment> {
        self.iter()
            .filter(|(id, c)| !c.directive.is_file_wide() && self.used_by[id.0].is_empty())
            .map(|(_, c)| c)
            .collect()
    }

    pub fn into_unused(self) -> Vec<UnusedSuppression> {
        self.unused_comments()
            .into_iter()
            .map(|c| UnusedSuppression {
                kind: c.directive.kind(),
                span: c.span(),
                codes: c
                    .directive
                    .codes()
                    .map(|codes| codes.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect()
    }
}
