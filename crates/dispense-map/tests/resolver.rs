//! Tests for column resolution against the default synonym table.

use dispense_map::{ColumnResolver, MappingError};
use dispense_model::{LogicalField, SynonymTable};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn resolves_abbreviated_headers() {
    let resolver = ColumnResolver::default();
    let map = resolver
        .resolve(&headers(&["FEC_RECETA", "COD_ITEM", "CANT_SOL"]))
        .expect("resolve");
    assert_eq!(map.date, "FEC_RECETA");
    assert_eq!(map.product_code, "COD_ITEM");
    assert_eq!(map.quantity, "CANT_SOL");
    assert!(map.warehouse.is_none());
    assert!(map.patient_id.is_none());
}

#[test]
fn binds_observed_spelling_case_insensitively() {
    let resolver = ColumnResolver::default();
    let map = resolver
        .resolve(&headers(&["fecha", "Cod_Producto", "cantidad", "almacen", "Cedula"]))
        .expect("resolve");
    assert_eq!(map.date, "fecha");
    assert_eq!(map.product_code, "Cod_Producto");
    assert_eq!(map.quantity, "cantidad");
    assert_eq!(map.warehouse.as_deref(), Some("almacen"));
    assert_eq!(map.patient_id.as_deref(), Some("Cedula"));
    assert_eq!(map.header(LogicalField::Warehouse), Some("almacen"));
}

#[test]
fn first_alias_wins_when_several_match() {
    let synonyms = SynonymTable::default()
        .with_aliases(LogicalField::Date, ["FECHA_DISPENSACION", "FECHA"]);
    let map = ColumnResolver::new(synonyms)
        .resolve(&headers(&["FECHA", "FECHA_DISPENSACION", "COD_PRODUCTO", "CANTIDAD"]))
        .expect("resolve");
    assert_eq!(map.date, "FECHA_DISPENSACION");
}

#[test]
fn missing_date_reports_field_and_headers() {
    let observed = headers(&["COD_PRODUCTO", "CANTIDAD", "OTRA"]);
    let error = ColumnResolver::default()
        .resolve(&observed)
        .expect_err("date column is missing");
    assert_eq!(
        error,
        MappingError::MissingRequiredColumns {
            missing: vec![LogicalField::Date],
            observed: observed.clone(),
        }
    );
    let message = error.to_string();
    assert!(message.contains("date"));
    assert!(message.contains("COD_PRODUCTO, CANTIDAD, OTRA"));
}

#[test]
fn reports_every_missing_required_field() {
    let error = ColumnResolver::default()
        .resolve(&headers(&["X", "Y"]))
        .expect_err("nothing resolves");
    let MappingError::MissingRequiredColumns { missing, .. } = error;
    assert_eq!(missing, LogicalField::REQUIRED.to_vec());
}
