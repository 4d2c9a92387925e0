//! Error types for the Saveguard telemetry pipeline.
//!
//! Two error classes exist in this system. Structural/validation failures
//! are reported as values (`bool` plus an optional diagnostic string) by the
//! validator and mapper and never appear here. This module covers the fatal
//! class: unreadable input, malformed JSON, a non-array batch file. These
//! abort a migration run with a non-zero exit and no partial output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Saveguard telemetry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// File read/write errors.
    Io,
    /// JSON parse and shape errors.
    Parse,
    /// Canonical schema violations.
    Validation,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Validation => write!(f, "validation"),
        }
    }
}

/// Unified fatal error type for the migration pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Input batch file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written.
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file holds malformed JSON.
    #[error("invalid JSON in {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input file parsed, but the top level is not an array.
    #[error("expected a JSON array at the top level of {path}")]
    NotAnArray { path: PathBuf },

    /// A value failed canonical validation where validity was required.
    #[error("event failed validation: {0}")]
    Validation(String),
}

impl Error {
    /// Category for grouping and reporting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ReadInput { .. } | Error::WriteOutput { .. } => ErrorCategory::Io,
            Error::ParseJson { .. } | Error::NotAnArray { .. } => ErrorCategory::Parse,
            Error::Validation(_) => ErrorCategory::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn categories_group_errors() {
        let io = Error::ReadInput {
            path: Path::new("events.json").to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(io.category(), ErrorCategory::Io);

        let shape = Error::NotAnArray {
            path: Path::new("events.json").to_path_buf(),
        };
        assert_eq!(shape.category(), ErrorCategory::Parse);
        assert_eq!(shape.category().to_string(), "parse");
    }

    #[test]
    fn display_includes_path() {
        let err = Error::NotAnArray {
            path: Path::new("batch.json").to_path_buf(),
        };
        assert!(err.to_string().contains("batch.json"));
    }
}
