//! Quantity coercion.

use dispense_ingest::any_to_string;
use polars::prelude::AnyValue;

/// Parses a quantity, tolerating decimal commas, currency symbols and units.
///
/// Returns `None` when nothing numeric remains.
pub fn coerce_numeric(value: &str) -> Option<f64> {
    let cleaned: String = value
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a quantity from a batch cell of any type.
pub fn cell_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float64(v) => Some(*v).filter(|v| v.is_finite()),
        AnyValue::Float32(v) => Some(f64::from(*v)).filter(|v| v.is_finite()),
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt64(v) => Some(*v as f64),
        other => coerce_numeric(&any_to_string(other.clone())),
    }
}
