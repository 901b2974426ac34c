//! Input handling for the dispensing pipeline.
//!
//! This crate locates and reads everything the pipeline consumes:
//!
//! - **Discovery**: glob-matched batch files in the input directory
//! - **Batches**: Parquet or CSV snapshots loaded as Polars DataFrames
//! - **Reference tables**: small code/name tables with encoding and
//!   separator probing
//! - **Cell helpers**: AnyValue to string / calendar-day conversion

mod batch;
mod discovery;
mod error;
mod polars_utils;
mod reference;

// === Error Types ===
pub use error::{IngestError, Result};

// === Discovery ===
pub use discovery::find_batch_files;

// === Batches ===
pub use batch::{BatchFormat, RawBatch, read_batch};

// === Reference Tables ===
pub use reference::{TextTable, read_optional_text_table, read_text_table};

// === Cell Helpers ===
pub use polars_utils::{any_to_day, any_to_string};
