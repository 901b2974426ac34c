//! Run metadata written to `schema_report.json`.

use std::collections::BTreeMap;

use chrono::Local;
use dispense_model::{CRITICAL_ITEMS, CriticalPatternTable, Frequency, ReferenceDomain};
use serde::Serialize;

/// Note shown to whoever reads the report when a batch fails to map.
pub const INFERRED_COLUMNS_NOTE: &str = "Columns are bound by synonym lists; if a required field \
is missing, extend the synonym table for that field.";

/// Headers observed in one batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSchema {
    pub file: String,
    pub columns: Vec<String>,
}

/// Contents of `schema_report.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaReport {
    /// Local wall-clock time, seconds precision.
    pub generated_at: String,
    pub parquet_glob: String,
    pub freq: Frequency,
    pub files: Vec<FileSchema>,
    pub inferred_columns_note: String,
    pub critical_items_input: Vec<String>,
    pub critical_items_labels: Vec<String>,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub items_found: usize,
    pub lookups: BTreeMap<ReferenceDomain, usize>,
}

impl SchemaReport {
    /// Starts a report stamped with the current local time.
    pub fn new(
        parquet_glob: impl Into<String>,
        freq: Frequency,
        patterns: &CriticalPatternTable,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            parquet_glob: parquet_glob.into(),
            freq,
            files: Vec::new(),
            inferred_columns_note: INFERRED_COLUMNS_NOTE.to_string(),
            critical_items_input: CRITICAL_ITEMS.iter().map(|s| (*s).to_string()).collect(),
            critical_items_labels: patterns.sorted_labels(),
            rows_read: 0,
            rows_kept: 0,
            items_found: 0,
            lookups: BTreeMap::new(),
        }
    }

    /// Records the headers of one batch.
    pub fn add_file(&mut self, file: impl Into<String>, columns: Vec<String>) {
        self.files.push(FileSchema {
            file: file.into(),
            columns,
        });
    }

    #[must_use]
    pub fn with_lookups(mut self, lookups: BTreeMap<ReferenceDomain, usize>) -> Self {
        self.lookups = lookups;
        self
    }

    #[must_use]
    pub fn with_counts(mut self, rows_read: usize, rows_kept: usize, items_found: usize) -> Self {
        self.rows_read = rows_read;
        self.rows_kept = rows_kept;
        self.items_found = items_found;
        self
    }
}
