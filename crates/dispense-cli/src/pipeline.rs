//! Dispensing ETL pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **References**: Load code-to-name lookups from the repository directory
//! 2. **Ingest**: Discover batch files and read each one
//! 3. **Enrich**: Resolve columns, join lookups, classify and filter rows
//! 4. **Aggregate**: Series, dimension breakdowns and KPIs over all records
//! 5. **Output**: Write the JSON artifacts
//!
//! Batches are processed in sorted file order and concatenated before any
//! aggregation happens.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use dispense_ingest::{find_batch_files, read_batch};
use dispense_map::ColumnResolver;
use dispense_model::{EnrichedRecord, PipelineOptions};
use dispense_report::{FileSchema, SchemaReport, aggregate, write_artifacts};
use dispense_transform::{ItemClassifier, Lookups, enrich_batch, load_lookups};
use tracing::{Level, debug, error, info, info_span, trace, warn};

use crate::logging::redact_value;
use crate::types::{BatchSummary, RunConfig, RunResult};

// ============================================================================
// Stage 1: References
// ============================================================================

/// Load every reference lookup; absent or malformed files leave a domain empty.
pub fn load_references(repo_dir: &Path, options: &PipelineOptions) -> Lookups {
    let span = info_span!("references", repo_dir = %repo_dir.display());
    let _guard = span.enter();
    let lookups = load_lookups(repo_dir, &options.references);
    for (domain, entries) in lookups.counts() {
        debug!(%domain, entries, "lookup ready");
    }
    lookups
}

// ============================================================================
// Stage 2-3: Ingest + Enrich
// ============================================================================

/// Result of the enrich stage.
#[derive(Debug, Default)]
pub struct EnrichResult {
    /// Kept records from every batch, in file order.
    pub records: Vec<EnrichedRecord>,
    pub batches: Vec<BatchSummary>,
    /// Headers observed per batch file.
    pub schemas: Vec<FileSchema>,
}

/// Read, resolve and enrich each batch file.
///
/// # Errors
///
/// Fails on the first batch that cannot be read or that lacks a required
/// column.
pub fn enrich_batches(
    files: &[PathBuf],
    options: &PipelineOptions,
    lookups: &Lookups,
) -> Result<EnrichResult> {
    let resolver = ColumnResolver::new(options.synonyms.clone());
    let classifier = ItemClassifier::new(&options.patterns).context("compile critical patterns")?;
    let mut result = EnrichResult::default();

    for path in files {
        let batch = read_batch(path).with_context(|| format!("read batch {}", path.display()))?;
        let headers = batch.headers();
        let span = info_span!("batch", file = %batch.file_name, rows = batch.height());
        let _guard = span.enter();

        let columns = match resolver.resolve(&headers) {
            Ok(columns) => columns,
            Err(err) => {
                error!(observed = ?headers, "required columns missing");
                return Err(err).with_context(|| format!("map columns of {}", batch.file_name));
            }
        };

        let outcome = enrich_batch(&batch, &columns, lookups, &classifier);
        if tracing::enabled!(Level::TRACE) {
            for record in &outcome.records {
                trace!(
                    day = %record.day,
                    item = %record.item,
                    quantity = ?record.quantity,
                    patient = redact_value(&record.patient_id),
                    "record kept"
                );
            }
        }
        info!(
            rows_read = outcome.rows_read,
            rows_kept = outcome.rows_kept,
            "batch processed"
        );

        result.batches.push(BatchSummary {
            file_name: outcome.file_name.clone(),
            columns: headers.len(),
            rows_read: outcome.rows_read,
            rows_kept: outcome.rows_kept,
            undated: outcome.undated,
            unclassified: outcome.unclassified,
        });
        result.schemas.push(FileSchema {
            file: batch.file_name.clone(),
            columns: headers,
        });
        result.records.extend(outcome.records);
    }

    Ok(result)
}

// ============================================================================
// Full run
// ============================================================================

/// Run every stage and write the artifacts.
pub fn run_pipeline(config: &RunConfig, options: &PipelineOptions) -> Result<RunResult> {
    let run_span = info_span!("run", freq = %options.frequency);
    let _run_guard = run_span.enter();

    let lookups = load_references(&config.repo_dir, options);

    let ingest_start = Instant::now();
    let files = find_batch_files(&config.input_dir, &config.parquet_glob)
        .context("discover batch files")?;
    info!(file_count = files.len(), "batch files found");

    let EnrichResult {
        records,
        batches,
        schemas,
    } = enrich_batches(&files, options, &lookups)?;
    info!(
        records = records.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "enrich complete"
    );
    if records.is_empty() {
        warn!("no critical-supply rows found; artifacts will be empty");
    }

    let aggregates = info_span!("aggregate")
        .in_scope(|| aggregate(&records, options.frequency))
        .context("aggregate records")?;

    let rows_read: usize = batches.iter().map(|b| b.rows_read).sum();
    let mut report = SchemaReport::new(&config.parquet_glob, options.frequency, &options.patterns)
        .with_lookups(lookups.counts())
        .with_counts(rows_read, records.len(), aggregates.items.len());
    for schema in schemas {
        report.add_file(schema.file, schema.columns);
    }

    let artifacts = info_span!("output", out_dir = %config.out_dir.display())
        .in_scope(|| write_artifacts(&config.out_dir, &aggregates, &report))
        .context("write artifacts")?;

    Ok(RunResult {
        out_dir: config.out_dir.clone(),
        artifacts,
        batches,
        lookups: report.lookups,
        kpis: aggregates.kpis,
        anchor: aggregates.anchor,
        frequency: options.frequency,
    })
}
