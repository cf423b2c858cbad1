//! Error handling for the QC engine.

use parquet::errors::ParquetError;

/// Specialized error type for QC report generation
#[derive(Debug, thiserror::Error)]
pub enum QcError {
    /// Error opening or reading a snapshot file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error from an Arrow compute kernel or batch construction
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An input relation was missing or empty; no report can be produced
    #[error("empty input relation '{relation}': cannot produce a QC report")]
    EmptyInput {
        /// Name of the relation that was empty
        relation: &'static str,
    },

    /// Error resolving or interpreting a table schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// Wrapped error with added context
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for QC engine operations
pub type Result<T> = std::result::Result<T, QcError>;
