//! Suppression directive parsing.
//!
//! # Supported Formats
//!
//! - `# noqa` - suppresses every code on the comment's logical line
//! - `# noqa: <codes>` (optionally `: <message>`) - suppresses the listed codes
//!   on the comment's logical line
//! - `# noqa-file: <codes>: <reason>` - suppresses the listed codes in the whole file
//! - `# lint-ignore: <codes>: <reason>` - suppresses the listed codes on the next statement
//! - `# lint-fixme: <codes>: <reason>` - same as `lint-ignore`, marking a known issue
//!
//! `lint-ignore` and `lint-fixme` reasons may continue on following comment
//! lines that start with `# lint:`.
//!
//! Matching is case-insensitive and tolerant of whitespace. Codes are
//! comma-separated and resolved through [`CodeAliases`]. A directive missing a
//! required part is not an error; the comment is simply not a directive.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use lintignore_types::DirectiveKind;
use regex::Regex;

use crate::aliases::CodeAliases;

const CODES: &str = r"[A-Za-z0-9_.\-]+(?:\s*,\s*[A-Za-z0-9_.\-]+)*";

/// A classified suppression comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    LineNoqa,
    CodedNoqa {
        codes: BTreeSet<String>,
    },
    FileNoqa {
        codes: BTreeSet<String>,
        reason: String,
    },
    LintIgnore {
        codes: BTreeSet<String>,
        reason: String,
    },
    LintFixme {
        codes: BTreeSet<String>,
        reason: String,
    },
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::LineNoqa => DirectiveKind::LineNoqa,
            Directive::CodedNoqa { .. } => DirectiveKind::CodedNoqa,
            Directive::FileNoqa { .. } => DirectiveKind::FileNoqa,
            Directive::LintIgnore { .. } => DirectiveKind::LintIgnore,
            Directive::LintFixme { .. } => DirectiveKind::LintFixme,
        }
    }

    /// Canonical codes named by the directive. `None` means every code.
    pub fn codes(&self) -> Option<&BTreeSet<String>> {
        match self {
            Directive::LineNoqa => None,
            Directive::CodedNoqa { codes }
            | Directive::FileNoqa { codes, .. }
            | Directive::LintIgnore { codes, .. }
            | Directive::LintFixme { codes, .. } => Some(codes),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Directive::LineNoqa | Directive::CodedNoqa { .. } => None,
            Directive::FileNoqa { reason, .. }
            | Directive::LintIgnore { reason, .. }
            | Directive::LintFixme { reason, .. } => Some(reason),
        }
    }

    /// Returns true if this directive names `canonical_code` (or names no code at all).
    pub fn suppresses(&self, canonical_code: &str) -> bool {
        match self.codes() {
            None => true,
            Some(codes) => codes.contains(canonical_code),
        }
    }

    /// Resolution order at a shared line: lower wins. Reason-bearing
    /// directives come before legacy `noqa`.
    pub fn priority(&self) -> u8 {
        match self {
            Directive::LintIgnore { .. } | Directive::LintFixme { .. } => 0,
            Directive::LineNoqa | Directive::CodedNoqa { .. } => 1,
            Directive::FileNoqa { .. } => 2,
        }
    }

    pub fn is_file_wide(&self) -> bool {
        matches!(self, Directive::FileNoqa { .. })
    }
}

/// A comment that opens a directive, before any `# lint:` continuation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Header {
    Complete(Directive),
    Lint {
        fixme: bool,
        codes: BTreeSet<String>,
        reason: String,
    },
}

impl Header {
    pub(crate) fn accepts_continuation(&self) -> bool {
        matches!(self, Header::Lint { .. })
    }

    /// Append continuation reasons and produce the directive. A lint
    /// directive that still has no reason is inert.
    pub(crate) fn finish(self, continuations: &[&str]) -> Option<Directive> {
        match self {
            Header::Complete(directive) => Some(directive),
            Header::Lint {
                fixme,
                codes,
                reason,
            } => {
                let reason = std::iter::once(reason.as_str())
                    .chain(continuations.iter().copied())
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                if reason.is_empty() {
                    return None;
                }
                Some(if fixme {
                    Directive::LintFixme { codes, reason }
                } else {
                    Directive::LintIgnore { codes, reason }
                })
            }
        }
    }
}

/// Classify a single comment.
///
/// Returns None if the comment is not a (complete) directive.
pub fn parse_directive(comment: &str, aliases: &CodeAliases) -> Option<Directive> {
    parse_header(comment, aliases)?.finish(&[])
}

pub(crate) fn parse_header(comment: &str, aliases: &CodeAliases) -> Option<Header> {
    let comment = comment.trim();

    if noqa_file_prefix().is_match(comment) {
        let caps = noqa_file_re().captures(comment)?;
        return Some(Header::Complete(Directive::FileNoqa {
            codes: parse_codes(&caps["codes"], aliases),
            reason: caps["reason"].to_string(),
        }));
    }

    if let Some(caps) = noqa_re().captures(comment) {
        let rest = caps.name("rest").map_or("", |m| m.as_str()).trim_start();
        let codes = rest
            .strip_prefix(':')
            .map(|list| leading_codes(list, aliases))
            .unwrap_or_default();
        let directive = if codes.is_empty() {
            Directive::LineNoqa
        } else {
            Directive::CodedNoqa { codes }
        };
        return Some(Header::Complete(directive));
    }

    if lint_prefix().is_match(comment) {
        let caps = lint_re().captures(comment)?;
        return Some(Header::Lint {
            fixme: caps["kind"].eq_ignore_ascii_case("fixme"),
            codes: parse_codes(&caps["codes"], aliases),
            reason: caps
                .name("reason")
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
        });
    }

    None
}

/// Returns the reason text of a `# lint: ...` continuation comment.
pub(crate) fn parse_continuation(comment: &str) -> Option<&str> {
    let comment = comment.trim();
    let caps = continuation_re().captures(comment)?;
    caps.name("reason").map(|r| r.as_str())
}

fn parse_codes(list: &str, aliases: &CodeAliases) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| aliases.resolve(code).to_string())
        .collect()
}

fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Codes at the head of a `noqa:` list, up to the message separator.
///
/// Stops at the first entry that does not start with a code; an entry with
/// trailing punctuation (`RuleA;`, `RuleA(flaky)`) keeps its code and ends the list.
fn leading_codes(list: &str, aliases: &CodeAliases) -> BTreeSet<String> {
    let list = list.split(':').next().unwrap_or_default();
    let mut codes = BTreeSet::new();
    for entry in list.split(',') {
        let entry = entry.trim();
        let len = entry.find(|c: char| !is_code_char(c)).unwrap_or(entry.len());
        if len == 0 {
            break;
        }
        codes.insert(aliases.resolve(&entry[..len]).to_string());
        if len < entry.len() {
            break;
        }
    }
    codes
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("directive regex should compile")
}

fn noqa_file_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)^#\s*noqa-file\b"))
}

fn noqa_file_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(&format!(
            r"(?i)^#\s*noqa-file\s*:\s*(?P<codes>{CODES})\s*:\s*(?P<reason>\S.*?)\s*$"
        ))
    })
}

fn noqa_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)^#\s*noqa(?P<rest>[\s:].*)?$"))
}

fn lint_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)^#\s*lint-(?:ignore|fixme)\b"))
}

fn lint_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(&format!(
            r"(?i)^#\s*lint-(?P<kind>ignore|fixme)\s*:\s*(?P<codes>{CODES})\s*(?::\s*(?P<reason>.*?))?\s*$"
        ))
    })
}

fn continuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)^#\s*lint:\s*(?P<reason>.*?)\s*$"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn parse(comment: &str) -> Option<Directive> {
        parse_directive(comment, &CodeAliases::new())
    }

    // ==================== noqa ====================

    #[test]
    fn bare_noqa_is_line_noqa() {
        assert_eq!(parse("# noqa"), Some(Directive::LineNoqa));
        assert_eq!(parse("#noqa"), Some(Directive::LineNoqa));
        assert_eq!(parse("# NOQA"), Some(Directive::LineNoqa));
    }

    #[test]
    fn noqa_followed_by_prose_stays_bare() {
        assert_eq!(parse("# noqa because reasons"), Some(Directive::LineNoqa));
        assert_eq!(parse("# noqa:"), Some(Directive::LineNoqa));
    }

    #[test]
    fn noqa_with_codes() {
        let directive = parse("# noqa: IgnoredRule").expect("should parse");
        assert_eq!(
            directive,
            Directive::CodedNoqa {
                codes: codes(&["IgnoredRule"])
            }
        );
        assert!(directive.suppresses("IgnoredRule"));
        assert!(!directive.suppresses("OtherRule"));
    }

    #[test]
    fn noqa_with_codes_and_message() {
        let directive = parse("# noqa: IgnoredRule, Ignored2Rule: Message").expect("should parse");
        assert_eq!(directive.codes(), Some(&codes(&["IgnoredRule", "Ignored2Rule"])));
        assert_eq!(directive.reason(), None);
    }

    #[test]
    fn noqa_codes_tolerate_whitespace() {
        let directive =
            parse("#noqa :IgnoredRule,Ignored1Rule ,  Ignored2Rule").expect("should parse");
        assert_eq!(
            directive.codes(),
            Some(&codes(&["IgnoredRule", "Ignored1Rule", "Ignored2Rule"]))
        );
    }

    #[test]
    fn noqa_codes_survive_trailing_punctuation() {
        let coded = |comment: &str| parse(comment).and_then(|d| d.codes().cloned());
        assert_eq!(coded("# noqa: RuleA, RuleB,"), Some(codes(&["RuleA", "RuleB"])));
        assert_eq!(coded("# noqa: RuleA;"), Some(codes(&["RuleA"])));
        assert_eq!(coded("# noqa: RuleA(flaky)"), Some(codes(&["RuleA"])));
    }

    #[test]
    fn noqa_code_list_stops_at_prose() {
        assert_eq!(
            parse("# noqa: this is prose"),
            Some(Directive::CodedNoqa {
                codes: codes(&["this"])
            })
        );
        assert_eq!(parse("# noqa: ;"), Some(Directive::LineNoqa));
    }

    #[test]
    fn noqa_prefix_must_be_a_whole_word() {
        assert_eq!(parse("# noqanope"), None);
        assert_eq!(parse("# not a noqa"), None);
    }

    #[test]
    fn noqa_resolves_aliases_and_keeps_unknown_codes() {
        let aliases: CodeAliases = [("IG00", "IgnoredRule")].into_iter().collect();
        let directive =
            parse_directive("# noqa: IG00, FutureRule", &aliases).expect("should parse");
        assert_eq!(directive.codes(), Some(&codes(&["FutureRule", "IgnoredRule"])));
    }

    // ==================== noqa-file ====================

    #[test]
    fn noqa_file_with_codes_and_reason() {
        let directive =
            parse("# noqa-file: IgnoredRule, Ignored1Rule: Some reason").expect("should parse");
        assert_eq!(
            directive,
            Directive::FileNoqa {
                codes: codes(&["IgnoredRule", "Ignored1Rule"]),
                reason: "Some reason".to_string(),
            }
        );
        assert!(directive.is_file_wide());
    }

    #[test]
    fn incomplete_noqa_file_is_plain_comment() {
        assert_eq!(parse("# noqa-file"), None);
        assert_eq!(parse("# noqa-file: IgnoredRule"), None);
        assert_eq!(parse("# noqa-file: IgnoredRule:   "), None);
    }

    // ==================== lint-ignore / lint-fixme ====================

    #[test]
    fn lint_ignore_with_reason() {
        let directive = parse("# lint-ignore: IgnoredRule: Some reason").expect("should parse");
        assert_eq!(
            directive,
            Directive::LintIgnore {
                codes: codes(&["IgnoredRule"]),
                reason: "Some reason".to_string(),
            }
        );
        assert_eq!(directive.priority(), 0);
    }

    #[test]
    fn lint_fixme_mixed_case() {
        let directive =
            parse("#  Lint-FIXME :IgnoredRule:  Some short reason  ").expect("should parse");
        assert_eq!(directive.kind(), DirectiveKind::LintFixme);
        assert_eq!(directive.reason(), Some("Some short reason"));
    }

    #[test]
    fn lint_directive_without_reason_is_inert() {
        assert_eq!(parse("# lint-ignore: IgnoredRule"), None);
        assert_eq!(parse("# lint-fixme: IgnoredRule:"), None);
        assert_eq!(parse("# lint-ignore"), None);
        assert_eq!(parse("# lint-ignored: IgnoredRule: reason"), None);
    }

    #[test]
    fn lint_header_takes_reason_from_continuation() {
        let header = parse_header("# lint-fixme: IgnoredRule:", &CodeAliases::new())
            .expect("header should parse");
        assert!(header.accepts_continuation());

        let directive = header.finish(&["fixed in the next", "release"]).expect("should finish");
        assert_eq!(directive.reason(), Some("fixed in the next release"));
    }

    #[test]
    fn continuation_comments() {
        assert_eq!(
            parse_continuation("# lint: multiple lines because it's long."),
            Some("multiple lines because it's long.")
        );
        assert_eq!(parse_continuation("#LINT:x"), Some("x"));
        assert_eq!(parse_continuation("# lint-ignore: X: y"), None);
        assert_eq!(parse_continuation("# linter: no"), None);
    }

    #[test]
    fn noqa_outranks_nothing_but_file() {
        assert!(Directive::LineNoqa.priority() > parse("# lint-ignore: A: b").unwrap().priority());
    }

    #[test]
    fn unrelated_comment_returns_none() {
        assert_eq!(parse("# This is a normal comment"), None);
        assert_eq!(parse("# type: ignore"), None);
    }
}
