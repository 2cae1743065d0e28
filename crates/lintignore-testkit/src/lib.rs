//! Shared test utilities for the lintignore workspace.
//!
//! This crate provides:
//! - **arb**: Proptest strategies for sources, directives and DTOs
//! - **source_builder**: A Python source builder that tracks line numbers
//! - **schema**: JSON schema validators for DTOs
//! - **fixtures**: Canonical sources and sample configs
//!
//! # Example
//!
//! ```rust,ignore
//! use lintignore_testkit::arb;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     fn comment_parses((text, kind) in arb::arb_directive_comment()) {
//!         // ...
//!     }
//! }
//! ```

pub mod arb;
pub mod fixtures;
pub mod schema;
pub mod source_builder;

pub use arb::{
    arb_config_file, arb_directive_comment, arb_file_with_reports, arb_python_source,
    arb_resolution_receipt,
};
pub use fixtures::{sample_configs, sample_sources};
pub use schema::{validate_config_file, validate_receipt_json, validate_resolution_receipt};
pub use source_builder::SourceBuilder;
