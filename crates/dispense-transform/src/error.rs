//! Error types for classification setup.

use thiserror::Error;

/// Errors raised while compiling the critical pattern table.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("invalid pattern '{pattern}' for label {label}: {source}")]
    InvalidPattern {
        label: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for classifier construction.
pub type Result<T> = std::result::Result<T, ClassifierError>;
