//! Error types for the Treeseal audit pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the audit core.
///
/// Integrity mismatches found during verification are never represented
/// here; they are reported structurally through
/// [`VerificationResult`](crate::verify::VerificationResult).
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found or not a directory: {0:?}")]
    TargetNotFound(PathBuf),

    #[error("Nothing to commit: {0}")]
    EmptyInput(String),

    #[error("Missing audit artifact(s): {}. Run `treeseal audit` first.", .0.join(", "))]
    MissingArtifacts(Vec<String>),

    #[error("Malformed manifest row {row}: {message}")]
    ManifestFormat { row: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuditError {
    /// Wrap an `std::io::Error` with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuditError::Io {
            path: path.into(),
            source,
        }
    }
}
