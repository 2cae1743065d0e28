//! Suppression comments: classified directives resolved to the lines they cover.

use std::ops::RangeInclusive;

use lintignore_tokens::{Position, Token, TokenKind};
use lintignore_types::SourceSpan;

use crate::aliases::CodeAliases;
use crate::directive::{Directive, parse_continuation, parse_header};
use crate::line_mapping::LineMapping;

/// The physical lines a suppression comment applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicableLines {
    /// May be empty, e.g. a `lint-ignore` with nothing after it.
    Range(RangeInclusive<u32>),
    WholeFile,
}

impl ApplicableLines {
    pub fn contains(&self, line: u32) -> bool {
        match self {
            ApplicableLines::Range(range) => range.contains(&line),
            ApplicableLines::WholeFile => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionComment {
    pub directive: Directive,
    /// Start of the first comment token.
    pub start: Position,
    /// End of the last comment token, including `# lint:` continuations.
    pub end: Position,
    pub applicable: ApplicableLines,
}

impl SuppressionComment {
    pub fn first_line(&self) -> u32 {
        self.start.line
    }

    pub fn last_line(&self) -> u32 {
        self.end.line
    }

    pub fn applies_to(&self, line: u32) -> bool {
        self.applicable.contains(line)
    }

    pub fn span(&self) -> SourceSpan {
        SourceSpan {
            start_line: self.start.line,
            start_column: self.start.column,
            end_line: self.end.line,
            end_column: self.end.column,
        }
    }
}

/// Collect every suppression comment in a token stream, in source order.
///
/// Comments that look like directives but miss a required part are skipped.
/// A `lint-ignore`/`lint-fixme` comment absorbs `# lint:` comments on the
/// physical lines directly below it.
pub fn parse_suppression_comments(
    tokens: &[Token],
    mapping: &LineMapping,
    aliases: &CodeAliases,
) -> Vec<SuppressionComment> {
    let comments: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .collect();

    let mut out = Vec::new();
    let mut i = 0;
    while i < comments.len() {
        let tok = comments[i];
        i += 1;

        let Some(header) = parse_header(&tok.text, aliases) else {
            continue;
        };

        let mut end = tok.end;
        let mut continuations: Vec<&str> = Vec::new();
        if header.accepts_continuation() {
            while let Some(next) = comments.get(i) {
                if next.start.line != end.line + 1 || !is_comment_only(mapping, next.start.line) {
                    break;
                }
                let Some(reason) = parse_continuation(&next.text) else {
                    break;
                };
                continuations.push(reason);
                end = next.end;
                i += 1;
            }
        }

        let Some(directive) = header.finish(&continuations) else {
            continue;
        };
        let applicable = applicable_lines(&directive, end.line, mapping);
        out.push(SuppressionComment {
            directive,
            start: tok.start,
            end,
            applicable,
        });
    }

    out
}

fn is_comment_only(mapping: &LineMapping, line: u32) -> bool {
    mapping.logical_line(line).is_some_and(|l| !l.has_code)
}

fn applicable_lines(
    directive: &Directive,
    last_line: u32,
    mapping: &LineMapping,
) -> ApplicableLines {
    match directive {
        Directive::FileNoqa { .. } => ApplicableLines::WholeFile,
        Directive::LineNoqa | Directive::CodedNoqa { .. } => ApplicableLines::Range(
            mapping
                .logical_line(last_line)
                .map(|l| l.physical_lines())
                .unwrap_or(last_line..=last_line),
        ),
        Directive::LintIgnore { .. } | Directive::LintFixme { .. } => {
            let own_last = mapping
                .logical_line(last_line)
                .map(|l| l.last)
                .unwrap_or(last_line);
            let next = mapping
                .logical_line(last_line)
                .and_then(|own| mapping.next_statement_after(own));
            ApplicableLines::Range(match next {
                Some(next) => next.physical_lines(),
                None => own_last + 1..=mapping.line_count(),
            })
        }
    }
}
