//! Error types for batch and reference ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Discovery Errors ===
    /// Input directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The batch glob is not a valid pattern.
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The batch glob matched no files.
    #[error("no batch files matching '{pattern}' in {dir}")]
    NoBatchFiles { pattern: String, dir: PathBuf },

    // === File Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch file extension is neither Parquet nor CSV.
    #[error("unsupported batch format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to decode a batch file into a DataFrame.
    #[error("failed to read batch {path}: {message}")]
    BatchRead { path: PathBuf, message: String },

    /// Failed to parse a reference table.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
