//! Append-only per-version score history.
//!
//! One plain-text ledger per version, one comma-separated row per
//! (testcase, installer, day). The file is only ever appended to: each append
//! is a single line written in one call, so a crash mid-run leaves at worst
//! one truncated trailing line, detectable and discardable by any reader,
//! with every full line before it still valid.
//!
//! Running the reporter twice on the same day appends two rows for that day,
//! possibly with different scores as the lookback window shifts. That matches
//! how the ledger has always behaved and readers rely on it being a faithful
//! run log; [`HistoryLog::append_if_new`] exists for operators who want
//! at-most-one-row-per-day instead, but is never the default.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::Result;
use crate::score::ScoreResult;

/// Header written exactly once, at file creation.
pub const HEADER: &str = "date,testcase,installer,detail,score";

/// File name of the ledger inside each version directory.
pub const FILE_NAME: &str = "testcases_history.txt";

/// One persisted row of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// Reporting date, "%Y-%m-%d %H:%M".
    pub date: String,
    pub testcase: String,
    pub installer: String,
    /// Tier as a fraction string, e.g. "2/3".
    pub detail: String,
    /// Period pass percentage.
    pub score: f64,
}

impl HistoryRow {
    pub fn new(
        date: impl Into<String>,
        testcase: impl Into<String>,
        installer: impl Into<String>,
        result: &ScoreResult,
    ) -> Self {
        Self {
            date: date.into(),
            testcase: testcase.into(),
            installer: installer.into(),
            detail: result.tier.detail(),
            score: result.percent,
        }
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.date,
            self.testcase,
            self.installer,
            self.detail,
            format_score(self.score)
        )
    }

    /// Day part of the date, used as the dedup key.
    fn day(&self) -> &str {
        self.date.split_whitespace().next().unwrap_or(&self.date)
    }
}

/// Integral percentages keep a trailing ".0" so existing ledger consumers
/// always see a float in the score column.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}

/// Handle to one version's ledger.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Open the ledger for a version, creating the directory tree and the
    /// file (with its single header line) on first use.
    ///
    /// Called once per version per cycle; redundant calls are harmless and
    /// never duplicate the header.
    pub fn ensure(base_dir: &Path, version: &str) -> Result<Self> {
        let dir = base_dir.join(version);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        let path = dir.join(FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "creating history file");
            let mut file = File::create(&path)?;
            writeln!(file, "{HEADER}")?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row. Never rewrites or truncates existing content.
    pub fn append(&self, row: &HistoryRow) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", row.to_line())?;
        Ok(())
    }

    /// Deduplicating variant: skip the append when a row for the same
    /// (day, testcase, installer) already exists. Returns whether the row
    /// was written.
    pub fn append_if_new(&self, row: &HistoryRow) -> Result<bool> {
        let existing = fs::read_to_string(&self.path)?;
        let duplicate = existing.lines().skip(1).any(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            fields.len() >= 3
                && fields[0].starts_with(row.day())
                && fields[1] == row.testcase
                && fields[2] == row.installer
        });
        if duplicate {
            tracing::debug!(
                testcase = %row.testcase,
                installer = %row.installer,
                day = %row.day(),
                "row already recorded today, skipping"
            );
            return Ok(false);
        }
        self.append(row)?;
        Ok(true)
    }
}
