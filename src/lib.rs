//! Vitals - CI testcase health reporting library.
//!
//! Vitals aggregates historical test-run results from a result API, computes
//! a per-testcase health tier and period pass ratio for every
//! (version, installer) pair, appends the scores to a per-version
//! append-only ledger, and renders one static HTML status page per pair.
//!
//! # Example
//!
//! ```no_run
//! use vitals::config::Config;
//! use vitals::fetch::HttpFetcher;
//! use vitals::report::Reporter;
//!
//! let config = Config::from_file("reporting.yaml").unwrap();
//! let fetcher = HttpFetcher::new(&config).unwrap();
//! let reporter = Reporter::new(&config, &fetcher, "./display").unwrap();
//! let completed = reporter.run();
//! println!("Reported {completed} versions");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod export;
pub mod fetch;
pub mod history;
pub mod report;
pub mod score;

pub use core::{Error, Result};
