//! Normalization functions for raw batch and reference values.
//!
//! - **text**: product text folded to lowercase ASCII words
//! - **code**: identifier cleanup for float-corrupted codes
//! - **numeric**: tolerant quantity parsing
//! - **datetime**: calendar-day coercion from mixed cell types

pub mod code;
pub mod datetime;
pub mod numeric;
pub mod text;

pub use code::{clean_code, clean_with};
pub use datetime::{cell_to_day, parse_day};
pub use numeric::{cell_to_f64, coerce_numeric};
pub use text::normalize_text;
