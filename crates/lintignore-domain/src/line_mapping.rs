//! Physical line -> logical line mapping.
//!
//! A logical line is one statement: backslash continuations, bracketed
//! continuations and multi-line strings all fold into the line that started
//! the statement. Blank and comment-only lines are logical lines of their own
//! with `has_code == false`.

use std::ops::RangeInclusive;

use lintignore_tokens::{Token, TokenKind};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuppressError {
    #[error("token stream is empty")]
    EmptyTokenStream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalLine {
    /// First physical line; doubles as the logical line's identifier.
    pub first: u32,
    pub last: u32,
    /// False for blank and comment-only lines.
    pub has_code: bool,
}

impl LogicalLine {
    pub fn id(&self) -> u32 {
        self.first
    }

    pub fn physical_lines(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    pub fn contains(&self, line: u32) -> bool {
        self.physical_lines().contains(&line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMapping {
    lines: Vec<LogicalLine>,
    /// `owner[physical - 1]` is the index into `lines`.
    owner: Vec<usize>,
    degraded: bool,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    first: u32,
    last: u32,
    has_code: bool,
}

impl Pending {
    fn close(self) -> LogicalLine {
        LogicalLine {
            first: self.first,
            last: self.last,
            has_code: self.has_code,
        }
    }
}

impl LineMapping {
    /// Group the physical lines of one file into logical lines.
    ///
    /// The mapping is total over `1..=line_count()`. A file that ends inside
    /// an open statement (unterminated string, unclosed bracket, trailing
    /// backslash) folds everything from that statement through EOF into one
    /// trailing logical line and reports `is_degraded()`.
    pub fn compute(tokens: &[Token]) -> Result<Self, SuppressError> {
        if tokens.is_empty() {
            return Err(SuppressError::EmptyTokenStream);
        }

        let mut builder = Builder::default();
        let mut pending: Option<Pending> = None;
        let mut depth: u32 = 0;
        let mut eof: Option<u32> = None;

        for tok in tokens {
            if tok.kind == TokenKind::EndMarker {
                eof = Some(tok.start.line.max(1));
                break;
            }

            if pending.is_none() {
                builder.fill_gap_before(tok.start.line);
            }
            let first = builder.next_line.max(tok.start.line);
            let p = pending.get_or_insert(Pending {
                first,
                last: first,
                has_code: false,
            });
            p.last = p.last.max(tok.end.line).max(tok.start.line);

            match tok.kind {
                TokenKind::Comment => {}
                TokenKind::String => p.has_code = true,
                TokenKind::Other => {
                    let text = tok.text.trim();
                    if !text.is_empty() {
                        p.has_code = true;
                    }
                    match text {
                        "(" | "[" | "{" => depth = depth.saturating_add(1),
                        ")" | "]" | "}" => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                }
                TokenKind::Newline => {
                    depth = 0;
                    if let Some(p) = pending.take() {
                        builder.push(p.close());
                    }
                }
                TokenKind::Nl => {
                    if depth == 0 {
                        if let Some(p) = pending.take() {
                            builder.push(p.close());
                        }
                    }
                }
                TokenKind::EndMarker => unreachable!("handled above"),
            }
        }

        let mut degraded = false;
        match (pending.take(), eof) {
            (Some(mut p), Some(eof)) => {
                if p.has_code || depth > 0 {
                    debug!(
                        first = p.first,
                        eof, "statement still open at end of file; mapping it through EOF"
                    );
                    degraded = true;
                    p.last = p.last.max(eof);
                    builder.push(p.close());
                } else {
                    builder.push(p.close());
                    builder.push_eof(eof);
                }
            }
            (Some(p), None) => {
                degraded = p.has_code || depth > 0;
                builder.push(p.close());
            }
            (None, Some(eof)) => builder.push_eof(eof),
            (None, None) => {}
        }

        let Builder { lines, owner, .. } = builder;
        Ok(Self {
            lines,
            owner,
            degraded,
        })
    }

    /// The last physical line covered, i.e. the EOF line when the token
    /// stream carried an end marker.
    pub fn line_count(&self) -> u32 {
        self.owner.len() as u32
    }

    pub fn logical_lines(&self) -> &[LogicalLine] {
        &self.lines
    }

    pub fn logical_line(&self, physical: u32) -> Option<&LogicalLine> {
        let idx = physical.checked_sub(1)? as usize;
        self.owner.get(idx).map(|&i| &self.lines[i])
    }

    /// The first logical line holding code that starts after `logical` ends.
    pub fn next_statement_after(&self, logical: &LogicalLine) -> Option<&LogicalLine> {
        self.lines
            .iter()
            .skip_while(|l| l.first <= logical.last)
            .find(|l| l.has_code)
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

#[derive(Debug)]
struct Builder {
    lines: Vec<LogicalLine>,
    owner: Vec<usize>,
    /// First physical line not yet owned by a logical line.
    next_line: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            owner: Vec::new(),
            next_line: 1,
        }
    }
}

impl Builder {
    fn push(&mut self, line: LogicalLine) {
        if line.last < self.next_line {
            return;
        }
        let line = LogicalLine {
            first: line.first.max(self.next_line),
            ..line
        };
        self.fill_gap_before(line.first);

        let idx = self.lines.len();
        self.lines.push(line);
        for _ in line.first..=line.last {
            self.owner.push(idx);
        }
        self.next_line = line.last + 1;
    }

    /// Lines no token touched become empty logical lines of their own.
    fn fill_gap_before(&mut self, line: u32) {
        while self.next_line < line {
            let gap = self.next_line;
            self.push(LogicalLine {
                first: gap,
                last: gap,
                has_code: false,
            });
        }
    }

    fn push_eof(&mut self, eof: u32) {
        self.fill_gap_before(eof);
        self.push(LogicalLine {
            first: eof,
            last: eof,
            has_code: false,
        });
    }
}
