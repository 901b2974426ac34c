//! Aggregation and JSON artifacts for the dispensing dashboard.
//!
//! The unified record set is aggregated with Polars into per-period series,
//! per-dimension breakdowns and per-item KPIs, then written as the five JSON
//! files the static dashboard reads.

mod aggregate;
mod artifacts;
mod error;
mod schema;
mod writer;

pub use aggregate::{aggregate, records_frame};
pub use artifacts::{
    Aggregates, DimRow, Dimension, DimensionBreakdowns, ItemRow, KpiRow, SeriesRow,
};
pub use error::{ReportError, Result};
pub use schema::{FileSchema, INFERRED_COLUMNS_NOTE, SchemaReport};
pub use writer::{
    AGG_DIM_FILE, ITEMS_FILE, KPI_FILE, SCHEMA_REPORT_FILE, SERIES_FILE, write_artifacts,
    write_json,
};
