//! Vitals CLI - CI testcase health reporting.

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vitals::cli::{Cli, Command};
use vitals::config::Config;
use vitals::export;
use vitals::fetch::HttpFetcher;
use vitals::history::HistoryLog;
use vitals::report::Reporter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Config first: logging level and file come from it, and a partial
    // configuration must abort before any processing.
    let config = Config::from_file(&cli.config)?;
    init_tracing(&config)?;

    match cli.command {
        Command::Status(args) => {
            let fetcher = HttpFetcher::new(&config)?;
            let reporter = Reporter::new(&config, &fetcher, &cli.output)?
                .dedup(args.dedup)
                .with_csv(args.csv)
                .with_pdf(args.pdf);
            let completed = reporter.run();
            tracing::info!(
                completed,
                total = config.general.versions.len(),
                "reporting cycle finished"
            );
            if completed == 0 {
                anyhow::bail!("no version completed");
            }
        }
        Command::Export(args) => {
            for version in &config.general.versions {
                // A version whose ledger is unreachable loses its exports,
                // not the exports of its siblings.
                let log = match HistoryLog::ensure(&cli.output, version) {
                    Ok(log) => log,
                    Err(e) => {
                        tracing::error!(version = %version, error = %e, "version skipped");
                        continue;
                    }
                };
                let version_dir = cli.output.join(version);
                for installer in &config.general.installers {
                    if !args.no_csv {
                        if let Err(e) = export::export_csv(log.path(), installer) {
                            tracing::warn!(version = %version, installer = %installer, error = %e, "CSV export failed");
                        }
                    }
                    if args.pdf {
                        let html = version_dir.join(format!("status-{installer}.html"));
                        let pdf = version_dir.join(format!("status-{installer}.pdf"));
                        if let Err(e) = export::export_pdf(&html, &pdf) {
                            tracing::warn!(version = %version, installer = %installer, error = %e, "PDF export failed");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Console plus log-file output; `RUST_LOG` overrides the configured level.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log.level));
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.general.log.file)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .init();
    Ok(())
}
