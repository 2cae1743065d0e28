//! Common test fixtures for lintignore.
//!
//! Canonical sources exercising each directive family, and sample configs.

use lintignore_types::ConfigFile;

// =============================================================================
// Sample Sources
// =============================================================================

/// Python sources paired with the lines a given code is suppressed on.
pub mod sample_sources {
    /// A source, the code to query, and the lines that code is suppressed on
    /// when every line through EOF is queried.
    #[derive(Debug, Clone, Copy)]
    pub struct Fixture {
        pub name: &'static str,
        pub source: &'static str,
        pub code: &'static str,
        pub ignored_lines: &'static [u32],
    }

    pub fn bare_noqa() -> Fixture {
        Fixture {
            name: "bare_noqa",
            source: "fn1()\nfn2()  # noqa\nfn3()\n",
            code: "IgnoredRule",
            ignored_lines: &[2],
        }
    }

    pub fn coded_noqa() -> Fixture {
        Fixture {
            name: "coded_noqa",
            source: "fn1()  # noqa: IgnoredRule\n\
                     fn2()  # noqa: Ignored1Rule, Ignored2Rule: Message\n",
            code: "Ignored1Rule",
            ignored_lines: &[2],
        }
    }

    pub fn multiline_noqa() -> Fixture {
        Fixture {
            name: "multiline_noqa",
            source: "fn1(line, \\\ncontinuation)  # noqa: IgnoredRule\n\nfn3('''\n    text\n''')  # noqa: IgnoredRule\n",
            code: "IgnoredRule",
            ignored_lines: &[1, 2, 4, 5, 6],
        }
    }

    pub fn noqa_file() -> Fixture {
        Fixture {
            name: "noqa_file",
            source: "# noqa-file: IgnoredRule: Some reason\nfn1()\n",
            code: "IgnoredRule",
            ignored_lines: &[1, 2, 3],
        }
    }

    pub fn lint_ignore() -> Fixture {
        Fixture {
            name: "lint_ignore",
            source: "fn1()\n\n# lint-ignore: IgnoredRule: Some reason\nfn2()\n\nfn3()\n",
            code: "IgnoredRule",
            ignored_lines: &[4],
        }
    }

    pub fn lint_fixme_continued() -> Fixture {
        Fixture {
            name: "lint_fixme_continued",
            source: "# lint-fixme: IgnoredRule: Some reason spanning\n\
                     # lint: multiple lines.\n\
                     fn3(\n    1,\n)\nfn4()\n",
            code: "IgnoredRule",
            ignored_lines: &[3, 4, 5],
        }
    }

    pub fn all() -> Vec<Fixture> {
        vec![
            bare_noqa(),
            coded_noqa(),
            multiline_noqa(),
            noqa_file(),
            lint_ignore(),
            lint_fixme_continued(),
        ]
    }
}

// =============================================================================
// Sample Configs
// =============================================================================

pub mod sample_configs {
    use super::*;

    pub fn empty() -> ConfigFile {
        ConfigFile::built_in()
    }

    /// Legacy short codes mapped to their canonical rule names.
    pub fn legacy_aliases() -> ConfigFile {
        ConfigFile {
            includes: vec![],
            aliases: [("IG00", "IgnoredRule"), ("IG01", "NoAssertEqualsRule")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            unused_suppression_code: None,
        }
    }

    pub fn custom_unused_code() -> ConfigFile {
        ConfigFile {
            unused_suppression_code: Some("LintUnused".to_string()),
            ..ConfigFile::built_in()
        }
    }

    pub fn legacy_aliases_toml() -> &'static str {
        "[aliases]\nIG00 = \"IgnoredRule\"\nIG01 = \"NoAssertEqualsRule\"\n"
    }
}
