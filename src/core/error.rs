//! Error types for the vitals library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using vitals' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (missing file, missing key, bad value).
    #[error("Configuration error: {0}")]
    Config(String),

    /// History log could not be created or written for a version.
    #[error("History log error for version {version}: {message}")]
    History { version: String, message: String },

    /// Result API error. The fetch layer degrades these to empty
    /// collections; this variant only surfaces from client construction.
    #[error("Result API error: {0}")]
    Api(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(String),

    /// Export error (CSV/PDF). Callers log and continue.
    #[error("Export error: {0}")]
    Export(String),

    /// Output file not found.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

impl Error {
    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new history error scoped to one version.
    pub fn history(version: impl Into<String>, message: impl Into<String>) -> Self {
        Self::History {
            version: version.into(),
            message: message.into(),
        }
    }

    /// Create a new export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("missing key general.period");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing key general.period"
        );

        let err = Error::history("v1", "permission denied");
        assert_eq!(
            err.to_string(),
            "History log error for version v1: permission denied"
        );
    }

    #[test]
    fn test_export_error() {
        let err = Error::export("wkhtmltopdf not found");
        match err {
            Error::Export(message) => assert_eq!(message, "wkhtmltopdf not found"),
            _ => panic!("Expected Export"),
        }
    }

    #[test]
    fn test_file_not_found_display() {
        let err = Error::FileNotFound {
            path: PathBuf::from("display/v1/status-apex.html"),
        };
        assert_eq!(err.to_string(), "File not found: display/v1/status-apex.html");
    }
}
