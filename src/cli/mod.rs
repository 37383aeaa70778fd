//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Vitals - CI testcase health reporting.
#[derive(Parser)]
#[command(name = "vitals")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Reporting configuration file (YAML)
    #[arg(short, long, env = "VITALS_CONFIG")]
    pub config: PathBuf,

    /// Output directory for status pages and history ledgers
    #[arg(short, long, default_value = "./display")]
    pub output: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score all testcases, append history rows and render status pages
    Status(StatusArgs),

    /// Re-run CSV/PDF exports against an existing output directory
    Export(ExportArgs),
}

#[derive(Args)]
pub struct StatusArgs {
    /// Skip history rows already recorded for the same day
    ///
    /// The default appends one row per run, so same-day reruns produce
    /// duplicate rows with possibly different scores.
    #[arg(long)]
    pub dedup: bool,

    /// Also write per-installer CSV extracts of each history ledger
    #[arg(long)]
    pub csv: bool,

    /// Also convert each status page to PDF (requires wkhtmltopdf)
    #[arg(long)]
    pub pdf: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Skip the CSV extracts
    #[arg(long)]
    pub no_csv: bool,

    /// Also convert status pages to PDF (requires wkhtmltopdf)
    #[arg(long)]
    pub pdf: bool,
}
