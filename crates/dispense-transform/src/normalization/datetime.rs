//! Calendar-day coercion for dispensing dates.

use chrono::{NaiveDate, NaiveDateTime};
use dispense_ingest::{any_to_day, any_to_string};
use polars::prelude::AnyValue;

/// Parses a date or datetime string into its calendar day.
///
/// Slash and dash dates without a leading year are read day-first.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    try_parse_datetime(value)
        .map(|dt| dt.date())
        .or_else(|| try_parse_date(value))
        .or_else(|| {
            // Unknown time suffix: keep the date part only.
            let date_part = value.split([' ', 'T']).next()?;
            (date_part.len() < value.len())
                .then(|| try_parse_date(date_part))
                .flatten()
        })
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d", // ISO: 2025-01-15
        "%Y/%m/%d",
        "%d/%m/%Y", // Local exports: 15/01/2025
        "%d-%m-%Y",
        "%Y%m%d", // Compact: 20250115
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Reads a calendar day from a batch cell of any type.
pub fn cell_to_day(value: &AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => parse_day(s),
        AnyValue::StringOwned(s) => parse_day(s),
        other => any_to_day(other).or_else(|| parse_day(&any_to_string(other.clone()))),
    }
}
