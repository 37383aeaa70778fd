//! The reporting cycle: versions × installers × testcases.

use std::path::{Path, PathBuf};

use chrono::Local;
use rayon::prelude::*;

use crate::config::Config;
use crate::export;
use crate::fetch::ResultFetcher;
use crate::history::{HistoryLog, HistoryRow};
use crate::report::{Renderer, ReportContext};
use crate::score::{self, ScoreResult};

/// Orchestrates one full reporting cycle.
///
/// Iterates versions, installers and testcases in configured order, scores
/// each testcase from its two fetch windows, records one history row per
/// (testcase, installer) and renders one status page per (version,
/// installer). Faults are contained per unit: a testcase with no data scores
/// NoData, a version whose ledger cannot be written is skipped, exports are
/// best-effort.
pub struct Reporter<'a> {
    config: &'a Config,
    fetcher: &'a dyn ResultFetcher,
    renderer: Renderer,
    output_dir: PathBuf,
    /// Skip history rows already recorded for the same day. Off by default:
    /// the ledger is a run log and same-day reruns append duplicate rows.
    dedup: bool,
    with_csv: bool,
    with_pdf: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn ResultFetcher,
        output_dir: impl Into<PathBuf>,
    ) -> crate::core::Result<Self> {
        Ok(Self {
            config,
            fetcher,
            renderer: Renderer::new()?,
            output_dir: output_dir.into(),
            dedup: false,
            with_csv: false,
            with_pdf: false,
        })
    }

    pub fn dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_csv(mut self, with_csv: bool) -> Self {
        self.with_csv = with_csv;
        self
    }

    pub fn with_pdf(mut self, with_pdf: bool) -> Self {
        self.with_pdf = with_pdf;
        self
    }

    /// Run one full cycle. Returns the number of versions that completed.
    ///
    /// A version that fails (ledger unwritable, template fault) is logged
    /// and skipped; sibling versions still run.
    pub fn run(&self) -> usize {
        let date = Local::now().format("%Y-%m-%d %H:%M").to_string();
        let general = &self.config.general;

        tracing::info!(
            period = general.period,
            versions = ?general.versions,
            installers = ?general.installers,
            testcases = self.config.tests.list.len(),
            "starting reporting cycle"
        );

        let mut completed = 0;
        for version in &general.versions {
            match self.run_version(version, &date) {
                Ok(()) => completed += 1,
                Err(e) => {
                    tracing::error!(version = %version, error = %e, "version skipped");
                }
            }
        }
        completed
    }

    fn run_version(&self, version: &str, date: &str) -> crate::core::Result<()> {
        tracing::debug!(version, "processing version");
        let log = HistoryLog::ensure(&self.output_dir, version)
            .map_err(|e| crate::core::Error::history(version, e.to_string()))?;
        let version_dir = self.output_dir.join(version);

        for installer in &self.config.general.installers {
            tracing::debug!(version, installer = %installer, "processing installer");
            let mut ctx = ReportContext::new(
                version,
                installer,
                self.config.general.period,
                date,
                &self.config.general.url,
            );

            // Fetching is embarrassingly parallel across testcases; appends
            // happen afterwards so the ledger keeps the configured order.
            let scores: Vec<(String, ScoreResult)> = self
                .config
                .tests
                .list
                .par_iter()
                .map(|testcase| {
                    let result = self.score_testcase(testcase, installer, version);
                    (testcase.clone(), result)
                })
                .collect();

            for (testcase, result) in scores {
                let row = HistoryRow::new(date, testcase.as_str(), installer.as_str(), &result);
                let append = if self.dedup {
                    log.append_if_new(&row).map(|_| ())
                } else {
                    log.append(&row)
                };
                append.map_err(|e| crate::core::Error::history(version, e.to_string()))?;
                ctx.push(&testcase, result);
            }

            self.renderer.render_to_file(&ctx, &version_dir)?;
            self.run_exports(&log, &version_dir, installer);
        }
        Ok(())
    }

    fn score_testcase(&self, testcase: &str, installer: &str, version: &str) -> ScoreResult {
        tracing::info!(testcase, installer, version, "scoring testcase");
        let period = self.fetcher.fetch(testcase, installer, version, false);
        let recent = self.fetcher.fetch(testcase, installer, version, true);
        if period.is_empty() && recent.is_empty() {
            tracing::info!(testcase, installer, version, "no results available");
        } else {
            tracing::info!(
                testcase,
                runs_over_period = period.len(),
                recent_runs = recent.len(),
                "results fetched"
            );
        }
        score::compute_score(&period, &recent)
    }

    fn run_exports(&self, log: &HistoryLog, version_dir: &Path, installer: &str) {
        if self.with_csv {
            if let Err(e) = export::export_csv(log.path(), installer) {
                tracing::warn!(installer, error = %e, "CSV export failed");
            }
        }
        if self.with_pdf {
            let html = version_dir.join(format!("status-{installer}.html"));
            let pdf = version_dir.join(format!("status-{installer}.pdf"));
            if let Err(e) = export::export_pdf(&html, &pdf) {
                tracing::warn!(installer, error = %e, "PDF export failed");
            }
        }
    }
}
