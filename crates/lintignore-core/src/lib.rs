//! Core engine: resolves one file's lint reports against its suppression
//! comments and produces receipts and outgoing report records.

mod audit;
mod config;
mod resolve;

pub use audit::{failure_receipt, unused_suppression_reports};
pub use config::{discover_config, load_config, load_config_with_includes};
pub use resolve::{
    FileResolution, ResolvePlan, collect_reports, render_receipt_json, resolve_file,
    resolve_to_summaries,
};
