//! Per-row enrichment of one resolved batch.

use dispense_ingest::{RawBatch, any_to_string};
use dispense_model::{CodeCleaning, ColumnMap, EnrichedRecord, ReferenceDomain};
use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::{debug, info_span};

use crate::classify::ItemClassifier;
use crate::lookup::Lookups;
use crate::normalization::{cell_to_day, cell_to_f64, clean_code, clean_with, normalize_text};

/// Records kept from one batch, with the counts behind them.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub file_name: String,
    pub records: Vec<EnrichedRecord>,
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows dropped because the date did not parse.
    pub undated: usize,
    /// Rows dropped because the product matched no critical label.
    pub unclassified: usize,
}

/// Bound columns of a batch; optional fields may be missing.
struct BatchColumns<'a> {
    date: Option<&'a Column>,
    product_code: Option<&'a Column>,
    quantity: Option<&'a Column>,
    warehouse: Option<&'a Column>,
    service_unit: Option<&'a Column>,
    prescriber_code: Option<&'a Column>,
    patient_id: Option<&'a Column>,
    product_description: Option<&'a Column>,
}

impl<'a> BatchColumns<'a> {
    fn bind(frame: &'a DataFrame, map: &ColumnMap) -> Self {
        let column = |name: Option<&str>| name.and_then(|n| frame.column(n).ok());
        Self {
            date: column(Some(map.date.as_str())),
            product_code: column(Some(map.product_code.as_str())),
            quantity: column(Some(map.quantity.as_str())),
            warehouse: column(map.warehouse.as_deref()),
            service_unit: column(map.service_unit.as_deref()),
            prescriber_code: column(map.prescriber_code.as_deref()),
            patient_id: column(map.patient_id.as_deref()),
            product_description: column(map.product_description.as_deref()),
        }
    }
}

fn cell<'a>(column: Option<&'a Column>, idx: usize) -> AnyValue<'a> {
    column
        .and_then(|c| c.get(idx).ok())
        .unwrap_or(AnyValue::Null)
}

fn cell_text(column: Option<&Column>, idx: usize) -> String {
    any_to_string(cell(column, idx)).trim().to_string()
}

/// Cleaned code and its display label, falling back to the code itself.
fn labelled(lookups: &Lookups, domain: ReferenceDomain, raw: &str) -> (String, String) {
    let code = clean_code(Some(raw));
    let label = lookups
        .label(domain, &code)
        .map_or_else(|| code.clone(), str::to_string);
    (code, label)
}

/// Enriches, classifies and filters every row of `batch`.
///
/// Rows without a parseable date or a critical label are dropped; a
/// missing quantity is kept as `None`.
pub fn enrich_batch(
    batch: &RawBatch,
    columns: &ColumnMap,
    lookups: &Lookups,
    classifier: &ItemClassifier,
) -> BatchOutcome {
    let span = info_span!("enrich", file = %batch.file_name);
    let _guard = span.enter();

    let bound = BatchColumns::bind(&batch.frame, columns);
    let rows_read = batch.height();
    let mut outcome = BatchOutcome {
        file_name: batch.file_name.clone(),
        rows_read,
        ..BatchOutcome::default()
    };

    for idx in 0..rows_read {
        let raw_code = cell_text(bound.product_code, idx);
        let product_key = clean_with(CodeCleaning::Trim, &raw_code);
        let product_code = clean_code(Some(&raw_code));

        // Product keys are trimmed only; the numeric form is a fallback.
        let description = cell_text(bound.product_description, idx);
        let product_name = lookups
            .label(ReferenceDomain::Product, &product_key)
            .or_else(|| lookups.label(ReferenceDomain::Product, &product_code))
            .map(str::to_string)
            .or_else(|| (!description.is_empty()).then_some(description))
            .unwrap_or_else(|| product_code.clone());

        let Some(item) = classifier.classify(&normalize_text(Some(&product_name))) else {
            outcome.unclassified += 1;
            continue;
        };
        let Some(day) = cell_to_day(&cell(bound.date, idx)) else {
            outcome.undated += 1;
            continue;
        };

        let quantity = cell_to_f64(&cell(bound.quantity, idx));
        let (warehouse_id, warehouse) = labelled(
            lookups,
            ReferenceDomain::Warehouse,
            &cell_text(bound.warehouse, idx),
        );
        let (prescriber_id, prescriber) = labelled(
            lookups,
            ReferenceDomain::Prescriber,
            &cell_text(bound.prescriber_code, idx),
        );
        let (patient_id, patient) = labelled(
            lookups,
            ReferenceDomain::Patient,
            &cell_text(bound.patient_id, idx),
        );

        outcome.records.push(EnrichedRecord {
            day,
            item: item.to_string(),
            quantity,
            product_code,
            product_name,
            warehouse_id,
            warehouse,
            service_unit: cell_text(bound.service_unit, idx),
            prescriber_id,
            prescriber,
            patient_id,
            patient,
        });
    }

    outcome.rows_kept = outcome.records.len();
    debug!(
        rows_read = outcome.rows_read,
        rows_kept = outcome.rows_kept,
        undated = outcome.undated,
        unclassified = outcome.unclassified,
        "batch enriched"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_falls_back_to_cleaned_code() {
        let lookups = Lookups::new();
        assert_eq!(
            labelled(&lookups, ReferenceDomain::Prescriber, "27491.0"),
            ("27491".to_string(), "27491".to_string())
        );
        assert_eq!(
            labelled(&lookups, ReferenceDomain::Prescriber, ""),
            (String::new(), String::new())
        );
    }
}
