//! Row-level transformation for the dispensing pipeline.
//!
//! - **normalization**: text, code, quantity and date coercion
//! - **classify**: critical-item labelling of product text
//! - **lookup**: code-to-name lookups from reference tables
//! - **enrich**: per-batch enrichment and filtering into records

pub mod classify;
pub mod enrich;
pub mod error;
pub mod lookup;
pub mod normalization;

pub use classify::ItemClassifier;
pub use enrich::{BatchOutcome, enrich_batch};
pub use error::{ClassifierError, Result};
pub use lookup::{LookupMap, Lookups, build_lookup, load_lookups};
pub use normalization::{
    cell_to_day, cell_to_f64, clean_code, clean_with, coerce_numeric, normalize_text, parse_day,
};
