//! Configuration loading and management.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Main configuration structure.
///
/// Every key is mandatory: a report generated against a partial configuration
/// would silently drop versions or testcases, so a missing key aborts the run
/// before any processing starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub general: GeneralConfig,
    pub testapi: TestApiConfig,
    pub tests: TestsConfig,
}

/// General reporting parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Retention window in days for the period score.
    pub period: u32,
    /// Software versions to report on, in display order.
    pub versions: Vec<String>,
    /// Installers to report on, in display order.
    pub installers: Vec<String>,
    /// Recent-window size: how many of the latest executions feed the tier.
    pub nb_iteration_tests_success_criteria: u32,
    /// Base URL under which the rendered pages are published.
    pub url: String,
    pub log: LogConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter, e.g. "info" or "vitals=debug".
    pub level: String,
    /// Log file path, appended to alongside console output.
    pub file: String,
}

/// Result API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestApiConfig {
    /// Results endpoint, e.g. "https://testresults.example.org/api/v1/results".
    pub url: String,
    /// Optional HTTP proxy for environments behind one.
    #[serde(default)]
    pub proxy: Option<String>,
}

/// Testcase selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestsConfig {
    /// Testcases to score, in display order.
    pub list: Vec<String>,
}

impl Config {
    /// Load configuration from an explicit YAML file path.
    ///
    /// Errors if the file does not exist or any required key is absent.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::core::Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)
            .map_err(|e| crate::core::Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.general.versions.is_empty() {
            return Err(crate::core::Error::config("general.versions is empty"));
        }
        if self.general.installers.is_empty() {
            return Err(crate::core::Error::config("general.installers is empty"));
        }
        if self.tests.list.is_empty() {
            return Err(crate::core::Error::config("tests.list is empty"));
        }
        if self.general.nb_iteration_tests_success_criteria == 0 {
            return Err(crate::core::Error::config(
                "general.nb_iteration_tests_success_criteria must be >= 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_yaml() -> &'static str {
    r#"
general:
  period: 10
  versions: ["master", "v1"]
  installers: ["apex", "fuel"]
  nb_iteration_tests_success_criteria: 4
  url: "https://reports.example.org"
  log:
    level: "info"
    file: "vitals.log"
testapi:
  url: "https://testresults.example.org/api/v1/results"
tests:
  list: ["healthcheck", "smoke", "tempest"]
"#
}
