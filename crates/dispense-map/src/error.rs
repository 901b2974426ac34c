//! Error types for column resolution.

use std::fmt;

use dispense_model::LogicalField;

/// Errors from column resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// One or more required logical fields matched no observed header.
    MissingRequiredColumns {
        missing: Vec<LogicalField>,
        observed: Vec<String>,
    },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredColumns { missing, observed } => {
                let missing: Vec<&str> = missing.iter().map(|field| field.as_str()).collect();
                write!(
                    f,
                    "could not resolve required columns [{}]; observed headers: [{}]",
                    missing.join(", "),
                    observed.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for MappingError {}
