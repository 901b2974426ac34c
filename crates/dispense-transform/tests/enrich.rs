//! Tests for reference loading and batch enrichment.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use dispense_ingest::RawBatch;
use dispense_map::ColumnResolver;
use dispense_model::{CriticalPatternTable, ReferenceDomain, default_reference_sources};
use dispense_transform::{ItemClassifier, Lookups, enrich_batch, load_lookups};
use polars::prelude::*;
use tempfile::TempDir;

fn batch(frame: DataFrame) -> RawBatch {
    RawBatch {
        path: PathBuf::from("recetas_test.parquet"),
        file_name: "recetas_test.parquet".to_string(),
        frame,
    }
}

fn classifier() -> ItemClassifier {
    ItemClassifier::new(&CriticalPatternTable::default()).expect("default patterns compile")
}

fn reference_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("recetas2025_codigosproductos.csv"),
        "COD_PRODUCTO,DESCRIPCION\n118,Alcohol etílico 70%\n200,Guantes de látex\n300,Aspirina 100 mg\n",
    )
    .expect("write products");
    fs::write(
        dir.path().join("recetas2025_codigosmedicos.csv"),
        b"COD_MEDICO;MEDICO\n55.0;MU\xD1OZ\n",
    )
    .expect("write prescribers");
    fs::write(
        dir.path().join("recetas2025_cedulapacientes.csv"),
        "CEDULA,PACIENTE\n1234567,ANA\n7654321,\n",
    )
    .expect("write patients");
    fs::write(
        dir.path().join("recetas2025_cedularecurrentes.csv"),
        "CEDULA,PACIENTE\n1234567,OTRA\n7654321,LUIS\n",
    )
    .expect("write recurrent patients");
    fs::write(
        dir.path().join("recetas2025_codigosalmacenes.csv"),
        "10 - FARMACIA CENTRAL\n20 - DEPOSITO NORTE\nSIN SEPARADOR\n",
    )
    .expect("write warehouses");
    dir
}

#[test]
fn loads_all_reference_domains() {
    let dir = reference_dir();
    let lookups = load_lookups(dir.path(), &default_reference_sources());

    assert_eq!(
        lookups.label(ReferenceDomain::Product, "118"),
        Some("Alcohol etílico 70%")
    );
    assert_eq!(lookups.label(ReferenceDomain::Prescriber, "55"), Some("MUÑOZ"));
    assert_eq!(lookups.label(ReferenceDomain::Patient, "1234567"), Some("ANA"));
    assert_eq!(lookups.label(ReferenceDomain::Patient, "7654321"), Some("LUIS"));
    assert_eq!(
        lookups.label(ReferenceDomain::Warehouse, "10"),
        Some("FARMACIA CENTRAL")
    );
    assert_eq!(
        lookups.label(ReferenceDomain::Warehouse, "20"),
        Some("DEPOSITO NORTE")
    );
    assert_eq!(lookups.counts()[&ReferenceDomain::Warehouse], 2);
}

#[test]
fn missing_reference_files_leave_domains_empty() {
    let dir = TempDir::new().expect("temp dir");
    let lookups = load_lookups(dir.path(), &default_reference_sources());
    assert!(lookups.counts().values().all(|count| *count == 0));
}

#[test]
fn enriches_and_filters_rows() {
    let dir = reference_dir();
    let lookups = load_lookups(dir.path(), &default_reference_sources());
    let frame = df! {
        "Fecha" => ["2025-01-02", "02/01/2025", "no es fecha", "2025-01-03", "2025-01-04"],
        "COD_PRODUCTO" => ["118.0", "200", "118", "300", "999"],
        "CANTIDAD" => ["2", "3,5", "1", "4", "x"],
        "ALMACEN" => ["10", "20", "10", "10", "30"],
        "COD_MEDICO" => ["55", "", "55", "55", "55"],
        "CEDULA" => ["1234567", "7654321", "1", "1", "1"],
        "DESCRIPCION" => ["", "", "", "", "Algodón hidrófilo"],
    }
    .expect("frame");
    let batch = batch(frame);
    let columns = ColumnResolver::default()
        .resolve(&batch.headers())
        .expect("columns resolve");

    let outcome = enrich_batch(&batch, &columns, &lookups, &classifier());

    assert_eq!(outcome.rows_read, 5);
    assert_eq!(outcome.rows_kept, 3);
    assert_eq!(outcome.undated, 1);
    assert_eq!(outcome.unclassified, 1);

    let items: Vec<&str> = outcome.records.iter().map(|r| r.item.as_str()).collect();
    assert_eq!(items, vec!["ALCOHOL", "GUANTES", "ALGODON"]);

    let first = &outcome.records[0];
    assert_eq!(first.day, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    assert_eq!(first.quantity, Some(2.0));
    assert_eq!(first.product_code, "118");
    assert_eq!(first.warehouse, "FARMACIA CENTRAL");
    assert_eq!(first.prescriber, "MUÑOZ");
    assert_eq!(first.patient, "ANA");

    let second = &outcome.records[1];
    assert_eq!(second.day, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    assert_eq!(second.quantity, Some(3.5));
    assert_eq!(second.prescriber, "");
    assert_eq!(second.patient, "LUIS");

    let third = &outcome.records[2];
    assert_eq!(third.product_name, "Algodón hidrófilo");
    assert_eq!(third.quantity, None);
    assert_eq!(third.warehouse_id, "30");
    assert_eq!(third.warehouse, "30");
}

#[test]
fn product_lookup_prefers_exact_catalog_code() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("recetas2025_codigosproductos.csv"),
        "COD_PRODUCTO,DESCRIPCION\n10,Aspirina 100 mg\n10.5,Alcohol etilico 70\n",
    )
    .expect("write products");
    let lookups = load_lookups(dir.path(), &default_reference_sources());
    let frame = df! {
        "FECHA" => ["2025-01-02", "2025-01-02", "2025-01-02"],
        "COD_PRODUCTO" => [" 10.5 ", "10", "10.0"],
        "CANTIDAD" => ["1", "2", "3"],
    }
    .expect("frame");
    let batch = batch(frame);
    let columns = ColumnResolver::default()
        .resolve(&batch.headers())
        .expect("columns resolve");

    let outcome = enrich_batch(&batch, &columns, &lookups, &classifier());

    assert_eq!(outcome.rows_kept, 1);
    assert_eq!(outcome.unclassified, 2);
    let record = &outcome.records[0];
    assert_eq!(record.item, "ALCOHOL");
    assert_eq!(record.product_name, "Alcohol etilico 70");
    assert_eq!(record.quantity, Some(1.0));
}

#[test]
fn typed_parquet_cells_are_coerced() {
    let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let frame = df! {
        "FECHA_DISPENSACION" => [day],
        "COD_ITEM" => [118.0f64],
        "CANT_DISP" => [5i64],
        "PRODUCTO" => ["Alcohol en gel"],
    }
    .expect("frame");
    let batch = batch(frame);
    let columns = ColumnResolver::default()
        .resolve(&batch.headers())
        .expect("columns resolve");

    let outcome = enrich_batch(&batch, &columns, &Lookups::new(), &classifier());

    assert_eq!(outcome.rows_kept, 1);
    let record = &outcome.records[0];
    assert_eq!(record.day, day);
    assert_eq!(record.product_code, "118");
    assert_eq!(record.quantity, Some(5.0));
    assert_eq!(record.item, "ALCOHOL");
    assert_eq!(record.warehouse, "");
}
