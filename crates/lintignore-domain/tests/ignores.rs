//! Suppression resolution over whole source files.

use lintignore_domain::{CodeAliases, SuppressionIndex};
use lintignore_tokens::tokenize;
use lintignore_types::ReportSummary;

fn source(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn report(line: u32, code: &str) -> ReportSummary {
    ReportSummary {
        file_path: "fake/path.py".to_string(),
        code: code.to_string(),
        message: "message".to_string(),
        line,
        column: 0,
    }
}

fn legacy_aliases() -> CodeAliases {
    [("IG00", "IgnoredRule")].into_iter().collect()
}

/// Query every line through EOF with `code` and return the suppressed lines.
fn ignored_lines_with(source: &str, code: &str, aliases: &CodeAliases) -> Vec<u32> {
    let tokens = tokenize(source);
    let eof = tokens.last().expect("end marker").start.line;
    let mut index = SuppressionIndex::compute(&tokens, aliases).expect("non-empty tokens");
    (1..=eof)
        .filter(|&line| index.should_ignore(&report(line, code)))
        .collect()
}

fn ignored_lines(source: &str, code: &str) -> Vec<u32> {
    ignored_lines_with(source, code, &CodeAliases::new())
}

/// First physical line of every comment that suppressed nothing.
fn unused_comment_lines(source: &str, reports: &[(u32, &str)]) -> Vec<u32> {
    let aliases = CodeAliases::new();
    let tokens = tokenize(source);
    let mut index = SuppressionIndex::compute(&tokens, &aliases).expect("non-empty tokens");
    for &(line, code) in reports {
        index.should_ignore(&report(line, code));
    }
    let mut lines: Vec<u32> = index
        .unused_comments()
        .iter()
        .map(|c| c.first_line())
        .collect();
    lines.sort_unstable();
    lines
}

// ============================================================================
// Ignored lines
// ============================================================================

#[test]
fn bare_noqa_ignores_every_code_on_its_line() {
    let src = source(&["fn1()", "fn2()  # noqa", "fn3()"]);
    assert_eq!(ignored_lines(&src, "IgnoredRule"), vec![2]);
}

#[test]
fn coded_noqa_only_ignores_listed_codes() {
    let src = source(&[
        "fn1()  # noqa: IgnoredRule",
        "fn2()  # noqa: IgnoredRule: Message",
        "fn3()  # noqa: IgnoredRule, Ignored2Rule: Message",
        "fn4()  # noqa: Ignored1Rule",
        "fn5()  # noqa: Ignored1Rule, Ignored2Rule",
        "fn6()  # noqa: Ignored1Rule, Ignored2Rule: Message",
    ]);
    assert_eq!(ignored_lines(&src, "Ignored1Rule"), vec![4, 5, 6]);
}

#[test]
fn trailing_noqa_covers_continued_statements() {
    let src = source(&[
        "fn1(line, \\",
        "continuation)  # noqa: IgnoredRule",
        "",
        "fn2()",
        "",
        "fn3('''",
        "    multiline",
        "    string",
        "''')  # noqa: IgnoredRule",
    ]);
    assert_eq!(ignored_lines(&src, "IgnoredRule"), vec![1, 2, 6, 7, 8, 9]);
}

#[test]
fn noqa_file_ignores_every_line_through_eof() {
    let src = source(&["# noqa-file: IgnoredRule: Some reason", "fn1()"]);
    assert_eq!(ignored_lines(&src, "IgnoredRule"), vec![1, 2, 3]);
    assert!(ignored_lines(&src, "OtherRule").is_empty());
}

#[test]
fn noqa_file_with_multiple_codes() {
    let src = source(&[
        "# noqa-file: IgnoredRule, Ignored1Rule, Ignored2Rule: Some reason",
        "fn1()",
    ]);
    assert_eq!(ignored_lines(&src, "Ignored1Rule"), vec![1, 2, 3]);
}

#[test]
fn incomplete_noqa_file_is_inert() {
    let src = source(&[
        "# noqa-file",
        "# noqa-file: IgnoredRule",
        "# Neither of these noqa-files should work because they're incomplete",
        "fn1()",
    ]);
    assert!(ignored_lines(&src, "IgnoredRule").is_empty());
}

#[test]
fn legacy_alias_in_comment_matches_canonical_report() {
    let src = source(&["fn1() # noqa: IG00"]);
    assert_eq!(
        ignored_lines_with(&src, "IgnoredRule", &legacy_aliases()),
        vec![1]
    );
}

#[test]
fn legacy_alias_in_report_matches_canonical_comment() {
    let src = source(&["fn1() # noqa: IG00, IgnoredRule"]);
    assert_eq!(ignored_lines_with(&src, "IG00", &legacy_aliases()), vec![1]);
}

#[test]
fn unknown_codes_only_match_their_own_spelling() {
    let src = source(&["fn1() # noqa: FutureRule"]);
    assert_eq!(ignored_lines(&src, "FutureRule"), vec![1]);
    assert!(ignored_lines(&src, "futurerule").is_empty());
}

#[test]
fn lint_fixme_ignores_the_whole_next_statement() {
    let src = source(&[
        "fn1()",
        "",
        "# lint-fixme: IgnoredRule: Some short reason",
        "fn2(  # the call and its arguments are one statement",
        "    \"multiple\",",
        "    \"arguments\",",
        ")",
        "",
        "# lint-fixme: IgnoredRule: Some reason spanning",
        "# lint: multiple lines because it's long.",
        "fn3('''",
        "    multiline",
        "    string",
        "''')  # this function call is a single logical line",
        "",
        "fn4()",
    ]);
    assert_eq!(
        ignored_lines(&src, "IgnoredRule"),
        vec![4, 5, 6, 7, 11, 12, 13, 14]
    );
}

#[test]
fn lint_ignore_covers_next_statement_only() {
    let src = source(&[
        "fn1()",
        "",
        "# lint-ignore: IgnoredRule: Some reason",
        "fn2()",
        "",
        "fn3()",
    ]);
    assert_eq!(ignored_lines(&src, "IgnoredRule"), vec![4]);
}

#[test]
fn lint_ignore_before_eof_runs_through_eof() {
    let src = source(&["# lint-ignore: IgnoredRule: Some reason"]);
    assert_eq!(ignored_lines(&src, "IgnoredRule"), vec![2]);
}

#[test]
fn lint_ignore_without_reason_is_inert() {
    let src = source(&["# lint-ignore: IgnoredRule", "fn1()"]);
    assert!(ignored_lines(&src, "IgnoredRule").is_empty());
}

#[test]
fn lint_ignore_reason_may_come_from_continuation() {
    let src = source(&["# lint-ignore: IgnoredRule:", "# lint: reason below", "fn1()"]);
    assert_eq!(ignored_lines(&src, "IgnoredRule"), vec![3]);
}

#[test]
fn coded_noqa_with_trailing_punctuation_stays_coded() {
    let src = source(&[
        "fn1()  # noqa: RuleA, RuleB,",
        "fn2()  # noqa: RuleA;",
        "fn3()  # noqa: RuleA(flaky)",
    ]);
    assert!(ignored_lines(&src, "RuleC").is_empty());
    assert_eq!(ignored_lines(&src, "RuleA"), vec![1, 2, 3]);
    assert_eq!(ignored_lines(&src, "RuleB"), vec![1]);
}

#[test]
fn lint_comment_trailing_code_does_not_extend_fixme() {
    let src = source(&["# lint-fixme: RuleA: reason", "foo()  # lint: unrelated note", "bar()"]);
    assert_eq!(ignored_lines(&src, "RuleA"), vec![2]);
}

#[test]
fn noqa_inside_string_literal_does_nothing() {
    let src = source(&["x = \"# noqa\"", "y = '''", "# noqa", "'''"]);
    assert!(ignored_lines(&src, "IgnoredRule").is_empty());
}

#[test]
fn unterminated_string_does_not_prevent_resolution() {
    let src = source(&["fn1()  # noqa", "x = '''", "never closed"]);
    assert_eq!(ignored_lines(&src, "IgnoredRule"), vec![1]);
}

// ============================================================================
// Unused comments
// ============================================================================

#[test]
fn unused_noqa() {
    assert_eq!(unused_comment_lines("fn()  # noqa", &[]), vec![1]);
}

#[test]
fn used_noqa() {
    assert!(unused_comment_lines("fn()  # noqa", &[(1, "Ignored999Rule")]).is_empty());
}

#[test]
fn unused_lint_ignore() {
    let src = "# lint-ignore: Ignored999Rule: Some reason\nfn()";
    assert_eq!(unused_comment_lines(src, &[]), vec![1]);
}

#[test]
fn used_lint_ignore() {
    let src = "# lint-ignore: Ignored999Rule: Some reason\nfn()";
    assert!(unused_comment_lines(src, &[(2, "Ignored999Rule")]).is_empty());
}

#[test]
fn lint_ignore_is_used_before_noqa() {
    let src = "# lint-ignore: Ignored999Rule: Some reason\nfn()  # noqa";
    assert_eq!(unused_comment_lines(src, &[(2, "Ignored999Rule")]), vec![2]);
}

#[test]
fn duplicate_lint_ignores_credit_the_first() {
    let src = "# lint-ignore: Ignored999Rule: First\n# lint-ignore: Ignored999Rule: Second\nfn()";
    assert_eq!(unused_comment_lines(src, &[(3, "Ignored999Rule")]), vec![2]);
}

#[test]
fn noqa_file_is_never_reported_unused() {
    let src = "# noqa-file: Ignored999Rule: reason\nfn()";
    assert!(unused_comment_lines(src, &[]).is_empty());
}

#[test]
fn continued_lint_fixme_reports_its_first_line() {
    let src = "fn0()\n# lint-fixme: A: long\n# lint: reason\nfn()";
    assert_eq!(unused_comment_lines(src, &[(4, "B")]), vec![2]);
}

#[test]
fn rebuilt_indexes_agree() {
    let src = source(&[
        "# lint-ignore: A: r",
        "fn1()  # noqa",
        "fn2()  # noqa: B",
        "fn3()",
    ]);
    let reports = [(2, "A"), (2, "C"), (3, "A"), (3, "B"), (4, "B")];

    let aliases = CodeAliases::new();
    let tokens = tokenize(&src);
    let run = || {
        let mut index = SuppressionIndex::compute(&tokens, &aliases).expect("non-empty tokens");
        let decisions: Vec<bool> = reports
            .iter()
            .map(|&(line, code)| index.should_ignore(&report(line, code)))
            .collect();
        let unused: Vec<u32> = index.unused_comments().iter().map(|c| c.first_line()).collect();
        (decisions, unused)
    };

    let first = run();
    assert_eq!(first, run());
    assert_eq!(first.0, vec![true, true, false, true, false]);
    assert!(first.1.is_empty());
}
