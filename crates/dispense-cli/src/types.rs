use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use dispense_model::{Frequency, ReferenceDomain};
use dispense_report::KpiRow;

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub repo_dir: PathBuf,
    pub input_dir: PathBuf,
    pub parquet_glob: String,
    pub out_dir: PathBuf,
}

/// Per-batch counts shown in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub file_name: String,
    pub columns: usize,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub undated: usize,
    pub unclassified: usize,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunResult {
    pub out_dir: PathBuf,
    pub artifacts: Vec<PathBuf>,
    pub batches: Vec<BatchSummary>,
    pub lookups: BTreeMap<ReferenceDomain, usize>,
    pub kpis: Vec<KpiRow>,
    pub anchor: Option<NaiveDate>,
    pub frequency: Frequency,
}

impl RunResult {
    pub fn rows_read(&self) -> usize {
        self.batches.iter().map(|b| b.rows_read).sum()
    }

    pub fn rows_kept(&self) -> usize {
        self.batches.iter().map(|b| b.rows_kept).sum()
    }
}
