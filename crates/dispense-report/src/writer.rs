//! JSON artifact output.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::artifacts::Aggregates;
use crate::error::{ReportError, Result};
use crate::schema::SchemaReport;

pub const ITEMS_FILE: &str = "items.json";
pub const KPI_FILE: &str = "kpi.json";
pub const SERIES_FILE: &str = "series_day.json";
pub const AGG_DIM_FILE: &str = "agg_dim.json";
pub const SCHEMA_REPORT_FILE: &str = "schema_report.json";

/// Serializes `value` as pretty JSON into `dir/name`.
pub fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &'static str, value: &T) -> Result<PathBuf> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value).map_err(|source| ReportError::Serialize {
        artifact: name,
        source,
    })?;
    fs::write(&path, format!("{json}\n")).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Writes all five artifacts into `out_dir`, creating it if needed.
///
/// Returns the written paths in a fixed order.
pub fn write_artifacts(
    out_dir: &Path,
    aggregates: &Aggregates,
    report: &SchemaReport,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let paths = vec![
        write_json(out_dir, ITEMS_FILE, &aggregates.items)?,
        write_json(out_dir, KPI_FILE, &aggregates.kpis)?,
        write_json(out_dir, SERIES_FILE, &aggregates.series)?,
        write_json(out_dir, AGG_DIM_FILE, &aggregates.breakdowns)?,
        write_json(out_dir, SCHEMA_REPORT_FILE, report)?,
    ];
    info!(out_dir = %out_dir.display(), files = paths.len(), "artifacts written");
    Ok(paths)
}
