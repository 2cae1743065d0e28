//! Python source builders for constructing test files.
//!
//! Keeps track of physical line numbers while lines are appended so tests
//! can assert against the line a directive or statement landed on.
//!
//! # Example
//!
//! ```rust
//! use lintignore_testkit::source_builder::SourceBuilder;
//!
//! let mut builder = SourceBuilder::new();
//! builder.line("fn1()");
//! let comment = builder.lint_ignore(&["IgnoredRule"], "Some reason");
//! let target = builder.line("fn2()");
//! let source = builder.build();
//!
//! assert_eq!((comment, target), (2, 3));
//! assert!(source.contains("# lint-ignore: IgnoredRule: Some reason"));
//! ```

/// A builder for Python source text.
#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    lines: Vec<String>,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The line number the next appended line will get.
    pub fn next_line(&self) -> u32 {
        self.lines.len() as u32 + 1
    }

    /// Append one raw line; returns its line number.
    pub fn line(&mut self, text: impl Into<String>) -> u32 {
        let text = text.into();
        debug_assert!(!text.contains('\n'), "use `lines` for multi-line text");
        self.lines.push(text);
        self.lines.len() as u32
    }

    /// Append several raw lines; returns the first line number.
    pub fn lines<I, S>(&mut self, lines: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let first = self.next_line();
        for text in lines {
            self.line(text);
        }
        first
    }

    pub fn blank(&mut self) -> u32 {
        self.line("")
    }

    /// `code  # noqa`, or `code  # noqa: A, B` when codes are given.
    pub fn noqa(&mut self, code: &str, codes: &[&str]) -> u32 {
        if codes.is_empty() {
            self.line(format!("{code}  # noqa"))
        } else {
            self.line(format!("{code}  # noqa: {}", codes.join(", ")))
        }
    }

    pub fn noqa_file(&mut self, codes: &[&str], reason: &str) -> u32 {
        self.line(format!("# noqa-file: {}: {reason}", codes.join(", ")))
    }

    pub fn lint_ignore(&mut self, codes: &[&str], reason: &str) -> u32 {
        self.line(format!("# lint-ignore: {}: {reason}", codes.join(", ")))
    }

    pub fn lint_fixme(&mut self, codes: &[&str], reason: &str) -> u32 {
        self.line(format!("# lint-fixme: {}: {reason}", codes.join(", ")))
    }

    /// `# lint: <reason>` continuing the directive on the previous line.
    pub fn continuation(&mut self, reason: &str) -> u32 {
        self.line(format!("# lint: {reason}"))
    }

    /// A call spread over `args.len() + 2` lines; returns the first line.
    pub fn bracketed_call(&mut self, name: &str, args: &[&str]) -> u32 {
        let first = self.line(format!("{name}("));
        for arg in args {
            self.line(format!("    {arg},"));
        }
        self.line(")");
        first
    }

    /// Build with a trailing newline after the last line.
    pub fn build(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Build without the final newline.
    pub fn build_unterminated(&self) -> String {
        self.lines.join("\n")
    }
}
