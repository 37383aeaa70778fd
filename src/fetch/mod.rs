//! Result API client.
//!
//! The reporter treats the result API as best-effort: a connect failure, a
//! non-success status or a malformed payload all degrade to an empty record
//! collection so one flaky endpoint or testcase never aborts the reporting
//! cycle. The score engine then reports "no data" for that testcase.

use serde::Deserialize;

use crate::config::Config;
use crate::core::{Error, Result, RunRecord};

/// Source of raw run records for a (testcase, installer, version).
///
/// `recent_only` restricts the response to the last N executions (the
/// configured recent window) instead of the full retention period.
pub trait ResultFetcher: Sync {
    fn fetch(
        &self,
        testcase: &str,
        installer: &str,
        version: &str,
        recent_only: bool,
    ) -> Vec<RunRecord>;
}

/// Envelope of the results endpoint.
#[derive(Debug, Deserialize)]
struct ResultsPayload {
    #[serde(default)]
    results: Vec<RunRecord>,
}

/// HTTP implementation against the configured results endpoint.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
    period: u32,
    recent_window: u32,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        // A stalled fetch delays the cycle but must not wedge it.
        let mut builder = reqwest::blocking::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(60));
        if let Some(proxy) = &config.testapi.proxy {
            builder = builder
                .proxy(reqwest::Proxy::all(proxy.as_str()).map_err(|e| Error::Api(e.to_string()))?);
        }
        let client = builder.build().map_err(|e| Error::Api(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.testapi.url.clone(),
            period: config.general.period,
            recent_window: config.general.nb_iteration_tests_success_criteria,
        })
    }

    fn url(&self, testcase: &str, installer: &str, version: &str, recent_only: bool) -> String {
        let mut url = format!(
            "{}?case={}&period={}&installer={}&version={}",
            self.base_url, testcase, self.period, installer, version
        );
        if recent_only {
            url.push_str(&format!("&last={}", self.recent_window));
        }
        url
    }
}

impl ResultFetcher for HttpFetcher {
    fn fetch(
        &self,
        testcase: &str,
        installer: &str,
        version: &str,
        recent_only: bool,
    ) -> Vec<RunRecord> {
        let url = self.url(testcase, installer, version, recent_only);
        let response = match self.client.get(&url).send() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%url, error = %e, "result API unreachable, treating as no data");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            tracing::warn!(%url, status = %response.status(), "result API error status");
            return Vec::new();
        }
        match response.json::<ResultsPayload>() {
            Ok(payload) => payload.results,
            Err(e) => {
                tracing::warn!(%url, error = %e, "malformed result API payload");
                Vec::new()
            }
        }
    }
}
