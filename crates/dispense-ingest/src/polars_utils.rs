//! Polars AnyValue utility functions.
//!
//! Batch files arrive with arbitrary column types (a product code may be
//! stored as text in one snapshot and as a float in the next), so cells are
//! read back as strings or calendar days before any cleaning happens.

use chrono::{DateTime, NaiveDate};
use polars::prelude::{AnyValue, TimeUnit};

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_float(f64::from(v)),
        AnyValue::Float64(v) => format_float(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        AnyValue::Date(days) => epoch_day(days)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Formats a float the way a float-coerced identifier looks in text exports
/// (`27491.0`, `0.66224`), so the code cleaner sees the same shape either way.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return String::new();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

fn epoch_day(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(chrono::Duration::days(i64::from(days)))
}

/// Converts temporal AnyValues to a calendar day.
///
/// Returns `None` for non-temporal values; strings are left to the caller.
pub fn any_to_day(value: &AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => epoch_day(*days),
        AnyValue::Datetime(v, unit, _) => datetime_day(*v, *unit),
        _ => None,
    }
}

fn datetime_day(value: i64, unit: TimeUnit) -> Option<NaiveDate> {
    let (secs, nanos) = match unit {
        TimeUnit::Nanoseconds => (value.div_euclid(1_000_000_000), value.rem_euclid(1_000_000_000)),
        TimeUnit::Microseconds => (
            value.div_euclid(1_000_000),
            value.rem_euclid(1_000_000) * 1_000,
        ),
        TimeUnit::Milliseconds => (value.div_euclid(1_000), value.rem_euclid(1_000) * 1_000_000),
    };
    let nanos = u32::try_from(nanos).ok()?;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.date_naive())
}
