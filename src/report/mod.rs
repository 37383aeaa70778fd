//! Report aggregation and HTML rendering.

mod aggregator;
mod render;

pub use aggregator::Reporter;
pub use render::Renderer;

use serde::{Deserialize, Serialize};

use crate::score::ScoreResult;

/// Score of one testcase as rendered, keyed by its configured name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestcaseStatus {
    pub name: String,
    #[serde(flatten)]
    pub score: ScoreResult,
}

/// Everything one (version, installer) page needs.
///
/// Testcases keep their configured order; the page is a status board, not a
/// ranking. Owned by the aggregator for the duration of one rendering pass
/// and discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportContext {
    pub version: String,
    pub installer: String,
    /// Retention window in days.
    pub period: u32,
    /// Generation timestamp, "%Y-%m-%d %H:%M".
    pub date: String,
    /// Base URL under which the page is published; rendered as the page's
    /// permalink in the footer.
    pub base_url: String,
    pub testcases: Vec<TestcaseStatus>,
}

impl ReportContext {
    pub fn new(version: &str, installer: &str, period: u32, date: &str, base_url: &str) -> Self {
        Self {
            version: version.to_string(),
            installer: installer.to_string(),
            period,
            date: date.to_string(),
            base_url: base_url.to_string(),
            testcases: Vec::new(),
        }
    }

    /// Published location of this page under the base URL.
    pub fn published_url(&self) -> String {
        format!(
            "{}/{}/status-{}.html",
            self.base_url.trim_end_matches('/'),
            self.version,
            self.installer
        )
    }

    pub fn push(&mut self, name: &str, score: ScoreResult) {
        self.testcases.push(TestcaseStatus {
            name: name.to_string(),
            score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{compute_score, Tier};
    use crate::core::RunRecord;

    #[test]
    fn test_context_preserves_configured_order() {
        let mut ctx = ReportContext::new(
            "master",
            "apex",
            10,
            "2026-08-29 06:00",
            "https://reports.example.org",
        );
        for name in ["tempest", "healthcheck", "smoke"] {
            ctx.push(name, compute_score(&[], &[]));
        }
        let names: Vec<&str> = ctx.testcases.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["tempest", "healthcheck", "smoke"]);
    }

    #[test]
    fn test_status_serializes_flat() {
        let recent = vec![RunRecord::with_criteria("2026-08-28", "PASS")];
        let mut ctx = ReportContext::new(
            "master",
            "apex",
            10,
            "2026-08-29 06:00",
            "https://reports.example.org",
        );
        ctx.push("healthcheck", compute_score(&recent, &recent));
        assert_eq!(ctx.testcases[0].score.tier, Tier::Marginal);

        let json = serde_json::to_value(&ctx.testcases[0]).unwrap();
        assert_eq!(json["name"], "healthcheck");
        assert_eq!(json["tier"], "marginal");
        assert_eq!(json["percent"], 100.0);
    }

    #[test]
    fn test_published_url() {
        let ctx = ReportContext::new(
            "master",
            "apex",
            10,
            "2026-08-29 06:00",
            "https://reports.example.org/",
        );
        assert_eq!(
            ctx.published_url(),
            "https://reports.example.org/master/status-apex.html"
        );
    }
}
