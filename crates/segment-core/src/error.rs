use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the SUP segment analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The session database exists but could not be opened.
    #[error("Failed to open session database {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// No session database could be located.
    #[error("Database not found at {0}")]
    StoreNotFound(PathBuf),

    /// A query against an open session database failed.
    #[error("Database query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// One of the analysis thresholds is unusable.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// A report could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Whether the error means the store could not be reached at all, as
    /// opposed to failing part-way through the run.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            AnalyzerError::StoreUnavailable { .. } | AnalyzerError::StoreNotFound(_)
        )
    }
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
