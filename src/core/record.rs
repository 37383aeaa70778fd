//! Raw CI run records as returned by the result API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One CI execution result for a testcase.
///
/// Produced by the result API and consumed read-only. `criteria` is kept as a
/// raw JSON value because upstream data is heterogeneous: usually a plain
/// string ("PASS", "SUCCESS PASS", "FAIL"), sometimes a mapping of
/// sub-criteria, occasionally garbage (numbers, null) that must be skipped
/// rather than counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Execution start timestamp, e.g. "2026-08-28 04:30". Upstream emits
    /// ISO-ordered strings, so lexicographic order is chronological order;
    /// used as the sort and tie-break key when tiering.
    pub start_date: String,
    /// Pass/fail indicator. See [`passed`].
    #[serde(default)]
    pub criteria: Value,
}

impl RunRecord {
    pub fn new(start_date: impl Into<String>, criteria: Value) -> Self {
        Self {
            start_date: start_date.into(),
            criteria,
        }
    }

    /// Convenience constructor for a record with a plain string criteria.
    pub fn with_criteria(start_date: impl Into<String>, criteria: &str) -> Self {
        Self::new(start_date, Value::String(criteria.to_string()))
    }
}

/// The pass/fail policy, isolated so it is swappable under test.
///
/// A record passes when its criteria contains the substring "PASS". This is a
/// deliberate substring match, not an enum comparison: upstream emits values
/// like "PASS", "SUCCESS PASS" or per-step mappings, and stricter matching
/// silently drops valid passes.
///
/// Returns `None` when the criteria is not inspectable (neither a string nor
/// a mapping); such records count toward neither passes nor totals.
pub fn passed(criteria: &Value) -> Option<bool> {
    match criteria {
        Value::String(s) => Some(s.contains("PASS")),
        Value::Object(map) => Some(map.values().any(|v| match v {
            Value::String(s) => s.contains("PASS"),
            _ => false,
        })),
        _ => None,
    }
}
