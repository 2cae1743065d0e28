//! Suppression resolution: logical lines, directive comments and the
//! per-file suppression index.
//!
//! This crate is I/O-free. Feed it a token stream from `lintignore-tokens`
//! and the reports a rule engine raised, and it decides which reports are
//! silenced and which comments silenced nothing.

pub mod aliases;
pub mod comments;
pub mod directive;
pub mod ignores;
pub mod line_mapping;
pub mod report;

pub use aliases::CodeAliases;
pub use comments::{ApplicableLines, SuppressionComment, parse_suppression_comments};
pub use directive::{Directive, parse_directive};
pub use ignores::{CommentId, SuppressionIndex, ViolationId};
pub use line_mapping::{LineMapping, LogicalLine, SuppressError};
pub use report::{FailureReport, RuleReport, SuccessReport, Violation};
