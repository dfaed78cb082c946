//! Error types for rd-tools operations.

use thiserror::Error;

/// Result type alias for rd-tools operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing curves or scanning logs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Input values cannot be used for a metric computation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A trace or flag log line did not have the expected shape.
    #[error("Trace parse error at line {line}: {reason}")]
    TraceParse {
        /// Line number (1-based) where the error occurred.
        line: usize,
        /// Reason for the failure.
        reason: String,
    },

    /// Error importing a curve from CSV.
    #[error("CSV import error at line {line}: {reason}")]
    CsvImport {
        /// Line number where the error occurred.
        line: usize,
        /// Reason for the failure.
        reason: String,
    },

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid trace pattern.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
