//! Testcase health scoring.
//!
//! Two independent signals are computed per (testcase, installer, version):
//!
//! - a discrete [`Tier`] over the last N executions (the "recent window"),
//!   answering "has it *been* passing reliably", and
//! - a flat pass percentage over the retention period, answering "how often
//!   does it pass at all".
//!
//! The tier deliberately rewards sustained recent success over a single lucky
//! run: one pass is only [`Tier::Marginal`], and [`Tier::Stable`] requires
//! four consecutive passing runs at the chronological tail of the window.

use serde::{Deserialize, Serialize};

use crate::core::{passed, RunRecord};

/// Discrete health indicator for a testcase's recent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// No run available in the recent window.
    NoData,
    /// Runs exist but none passed.
    Failing,
    /// Exactly one pass: close to passing, not trustworthy yet.
    Marginal,
    /// Passing, but without 4 proven consecutive passes.
    Passing,
    /// The last 4 consecutive runs all passed.
    Stable,
}

impl Tier {
    /// Integer form: -1 for no data, 0..=3 otherwise.
    pub fn as_i8(self) -> i8 {
        match self {
            Tier::NoData => -1,
            Tier::Failing => 0,
            Tier::Marginal => 1,
            Tier::Passing => 2,
            Tier::Stable => 3,
        }
    }

    /// History-file detail column: `"<tier>/3"`.
    ///
    /// NoData renders as "0/3" so the column stays parseable as a fraction;
    /// the -1 form only exists in memory.
    pub fn detail(self) -> String {
        format!("{}/3", self.as_i8().max(0))
    }
}

/// Computed health of one testcase for one (installer, version).
///
/// Created fresh on every reporting cycle and flattened into a history row;
/// never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub tier: Tier,
    /// Passes over the retention period.
    pub period_ok: usize,
    /// Runs fetched over the retention period.
    pub period_total: usize,
    /// Period pass ratio in percent, 0 when no runs exist.
    pub percent: f64,
}

impl ScoreResult {
    /// "3/10"-style fraction for display.
    pub fn period_fraction(&self) -> String {
        format!("{}/{}", self.period_ok, self.period_total)
    }
}

/// Count passing records. Records whose criteria is not inspectable are
/// skipped in the pass count only: a numeric criteria must never show up as
/// a pass, but it still counts as a fetched run wherever a collection's
/// length is the denominator.
fn count_passes(records: &[RunRecord]) -> usize {
    records
        .iter()
        .filter(|r| passed(&r.criteria).unwrap_or(false))
        .count()
}

/// Period pass ratio in percent. Defined as 0 when `total` is 0 so an empty
/// period never raises a division fault mid-cycle.
pub fn success_percent(ok: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        ok as f64 / total as f64 * 100.0
    }
}

/// Tier over the recent window.
///
/// Sorts defensively by `start_date` (fetch ordering is never trusted) and
/// applies the ladder: no runs -> NoData, no pass -> Failing, one pass ->
/// Marginal, otherwise Passing unless the chronologically-last 4 runs of a
/// window larger than 3 all passed, which proves Stable. Windows of 3 or
/// fewer runs cannot prove 4-run stability and cap at Passing.
pub fn compute_tier(recent: &[RunRecord]) -> Tier {
    if recent.is_empty() {
        return Tier::NoData;
    }

    let mut runs: Vec<&RunRecord> = recent.iter().collect();
    runs.sort_by(|a, b| a.start_date.cmp(&b.start_date));

    let nb_ok = count_passes(recent);
    if nb_ok == 0 {
        return Tier::Failing;
    }
    if nb_ok == 1 {
        return Tier::Marginal;
    }

    if runs.len() > 3 {
        let last_4 = &runs[runs.len() - 4..];
        let all_pass = last_4
            .iter()
            .all(|r| passed(&r.criteria).unwrap_or(false));
        if all_pass {
            return Tier::Stable;
        }
    }
    Tier::Passing
}

/// Score one testcase from its two fetch windows.
///
/// `period` is the unbounded retention-window collection, `recent` the last-N
/// executions. Either may be empty; a fetch fault upstream arrives here as an
/// empty collection, never as an error.
pub fn compute_score(period: &[RunRecord], recent: &[RunRecord]) -> ScoreResult {
    let tier = compute_tier(recent);
    let period_ok = count_passes(period);
    let period_total = period.len();
    let percent = success_percent(period_ok, period_total);

    tracing::debug!(
        tier = tier.as_i8(),
        period_ok,
        period_total,
        percent,
        "score computed"
    );

    ScoreResult {
        tier,
        period_ok,
        period_total,
        percent,
    }
}
