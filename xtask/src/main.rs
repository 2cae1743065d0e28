use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use schemars::schema_for;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lintignore_core::{ResolvePlan, load_config, render_receipt_json, resolve_file};
use lintignore_domain::RuleReport;
use lintignore_types::ReportSummary;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Repo automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the "CI local" suite: fmt, clippy, test.
    Ci,

    /// Generate JSON Schemas for receipts/config into `schemas/`.
    Schema {
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,
    },

    /// Resolve a JSON list of reports against one source file and print the receipt.
    Resolve {
        /// Python source file the reports were raised in.
        source: PathBuf,

        /// JSON array of report summaries.
        #[arg(long)]
        reports: PathBuf,

        /// Config file; defaults to the nearest `lintignore.toml` above the source.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also print a report for every unused suppression comment.
        #[arg(long)]
        report_unused: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::Schema { out_dir } => schema(out_dir),
        Cmd::Resolve {
            source,
            reports,
            config,
            report_unused,
        } => resolve(&source, &reports, config.as_deref(), report_unused),
    }
}

fn ci() -> Result<()> {
    run("cargo", &["fmt", "--check"])?;
    run(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    run("cargo", &["test", "--workspace"])?;
    Ok(())
}

fn schema(out_dir: PathBuf) -> Result<()> {
    std::fs::create_dir_all(&out_dir).context("create schema output dir")?;

    let cfg_schema = schema_for!(lintignore_types::ConfigFile);
    let receipt_schema = schema_for!(lintignore_types::ResolutionReceipt);

    let cfg_path = out_dir.join("lintignore.config.schema.json");
    let receipt_path = out_dir.join("lintignore.resolution.schema.json");

    write_pretty_json(&cfg_path, &cfg_schema)?;
    write_pretty_json(&receipt_path, &receipt_schema)?;

    eprintln!("wrote {}", cfg_path.display());
    eprintln!("wrote {}", receipt_path.display());
    Ok(())
}

fn resolve(
    source_path: &Path,
    reports_path: &Path,
    config_path: Option<&Path>,
    report_unused: bool,
) -> Result<()> {
    let start_dir = source_path.parent().unwrap_or(Path::new("."));
    let config = load_config(config_path, start_dir)?;

    let source = std::fs::read_to_string(source_path)
        .with_context(|| format!("read source '{}'", source_path.display()))?;
    let text = std::fs::read_to_string(reports_path)
        .with_context(|| format!("read reports '{}'", reports_path.display()))?;
    let summaries: Vec<ReportSummary> = serde_json::from_str(&text)
        .with_context(|| format!("parse reports '{}'", reports_path.display()))?;
    info!("Resolving {} report(s)", summaries.len());

    let shared: Arc<str> = Arc::from(source.as_str());
    let reports = summaries
        .into_iter()
        .map(|s| {
            RuleReport::new(
                source_path,
                s.code,
                s.message,
                s.line,
                s.column,
                Arc::clone(&shared),
            )
        })
        .collect();

    let plan = ResolvePlan::from_config(source_path, &config).with_unused_reports(report_unused);
    let resolution = resolve_file(&plan, &source, reports)?;
    println!("{}", render_receipt_json(&resolution.receipt())?);

    if plan.report_unused {
        let unused = lintignore_core::unused_suppression_reports(
            &plan.path,
            &resolution.unused,
            &plan.unused_suppression_code,
        );
        println!(
            "{}",
            serde_json::to_string_pretty(&unused).context("serialize unused reports")?
        );
    }
    Ok(())
}

fn write_pretty_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serialize json")?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn run(bin: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(bin)
        .args(args)
        .status()
        .with_context(|| format!("run {bin} {args:?}"))?;
    if !status.success() {
        bail!("command failed: {bin} {args:?}");
    }
    Ok(())
}
