//! Best-effort CSV and PDF derivatives of the rendered report.
//!
//! Both exports consume artifacts the main cycle already produced (the
//! per-version history ledger, the rendered HTML page) and never abort the
//! run: callers log the returned error and continue.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::{Error, Result};
use crate::history;

/// Extract the history rows matching one installer into
/// `testcases_history_<installer>.csv` next to the ledger.
///
/// Matching is a line substring test, same as the consumers of these files
/// have always done; an installer name that happens to appear in a testcase
/// name will over-match, which is accepted.
pub fn export_csv(history_path: &Path, installer: &str) -> Result<PathBuf> {
    let dir = history_path
        .parent()
        .ok_or_else(|| Error::export("history file has no parent directory"))?;
    let csv_path = dir.join(format!("testcases_history_{installer}.csv"));

    let ledger = fs::read_to_string(history_path)?;
    let mut out = File::create(&csv_path)?;
    writeln!(out, "{}", history::HEADER)?;
    for line in ledger.lines().skip(1) {
        if line.contains(installer) {
            writeln!(out, "{line}")?;
        }
    }
    tracing::info!(path = %csv_path.display(), "CSV export written");
    Ok(csv_path)
}

/// Convert a rendered HTML page to PDF by shelling out to `wkhtmltopdf`.
///
/// The tool being absent is the common case on CI runners and is reported as
/// an ordinary export error.
pub fn export_pdf(html_path: &Path, pdf_path: &Path) -> Result<()> {
    if !html_path.exists() {
        return Err(Error::FileNotFound {
            path: html_path.to_path_buf(),
        });
    }
    let status = Command::new("wkhtmltopdf")
        .arg(html_path)
        .arg(pdf_path)
        .output()
        .map_err(|e| Error::export(format!("wkhtmltopdf failed to start: {e}")))?;
    if !status.status.success() {
        return Err(Error::export(format!(
            "wkhtmltopdf exited with {}: {}",
            status.status,
            String::from_utf8_lossy(&status.stderr).trim()
        )));
    }
    tracing::info!(path = %pdf_path.display(), "PDF export written");
    Ok(())
}
