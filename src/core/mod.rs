//! Core types for report generation.

mod error;
mod record;

pub use error::{Error, Result};
pub use record::{passed, RunRecord};
