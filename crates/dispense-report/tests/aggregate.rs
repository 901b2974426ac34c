//! Tests for aggregation and artifact output.

use chrono::{Duration, NaiveDate};
use dispense_model::{CriticalPatternTable, EnrichedRecord, Frequency};
use dispense_report::{
    AGG_DIM_FILE, Dimension, ITEMS_FILE, KPI_FILE, SCHEMA_REPORT_FILE, SERIES_FILE, SchemaReport,
    aggregate, write_artifacts,
};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn record(day: NaiveDate, item: &str, quantity: f64, warehouse: &str) -> EnrichedRecord {
    EnrichedRecord {
        day,
        item: item.to_string(),
        quantity: Some(quantity),
        product_code: "118".to_string(),
        product_name: item.to_lowercase(),
        warehouse_id: warehouse.to_string(),
        warehouse: warehouse.to_string(),
        service_unit: "URGENCIAS".to_string(),
        prescriber_id: "55".to_string(),
        prescriber: "MUÑOZ".to_string(),
        patient_id: "1234567".to_string(),
        patient: "ANA".to_string(),
    }
}

#[test]
fn kpi_windows_end_on_latest_day() {
    let anchor = date(2025, 3, 31);
    let back = |days: i64| anchor - Duration::days(days);
    let records = vec![
        record(anchor, "ALCOHOL", 2.0, "A"),
        record(back(6), "ALCOHOL", 1.0, "A"),
        record(back(7), "ALCOHOL", 20.0, "A"),
        record(back(29), "ALCOHOL", 4.0, "A"),
        record(back(30), "ALCOHOL", 100.0, "A"),
        record(back(35), "GUANTES", 50.0, "A"),
    ];

    let aggregates = aggregate(&records, Frequency::Daily).expect("aggregate");
    assert_eq!(aggregates.anchor, Some(anchor));

    let kpis = &aggregates.kpis;
    assert_eq!(kpis.len(), 2);
    assert_eq!(kpis[0].item, "ALCOHOL");
    assert_eq!(kpis[0].total, 127.0);
    assert_eq!(kpis[0].last_7_days, 3.0);
    assert_eq!(kpis[0].last_30_days, 27.0);
    assert_eq!(kpis[0].avg_daily_30_days, 27.0 / 30.0);

    assert_eq!(kpis[1].item, "GUANTES");
    assert_eq!(kpis[1].total, 50.0);
    assert_eq!(kpis[1].last_7_days, 0.0);
    assert_eq!(kpis[1].last_30_days, 0.0);
    assert_eq!(kpis[1].avg_daily_30_days, 0.0);
}

#[test]
fn monthly_series_buckets_to_first_of_month() {
    let records = vec![
        record(date(2025, 1, 5), "ALCOHOL", 1.0, "A"),
        record(date(2025, 1, 20), "ALCOHOL", 2.0, "A"),
        record(date(2025, 2, 1), "ALCOHOL", 4.0, "A"),
        record(date(2025, 1, 10), "GUANTES", 3.0, "A"),
    ];

    let aggregates = aggregate(&records, Frequency::Monthly).expect("aggregate");
    let series: Vec<(&str, &str, f64)> = aggregates
        .series
        .iter()
        .map(|row| (row.period.as_str(), row.item.as_str(), row.quantity))
        .collect();
    assert_eq!(
        series,
        vec![
            ("2025-01-01", "ALCOHOL", 3.0),
            ("2025-01-01", "GUANTES", 3.0),
            ("2025-02-01", "ALCOHOL", 4.0),
        ]
    );
}

#[test]
fn breakdowns_sort_by_quantity_then_value() {
    let day = date(2025, 1, 5);
    let records = vec![
        record(day, "ALCOHOL", 5.0, "B"),
        record(day, "ALCOHOL", 5.0, "A"),
        record(day, "ALCOHOL", 4.0, "C"),
        record(day, "ALCOHOL", 5.0, "C"),
        record(day, "GUANTES", 1.0, "A"),
    ];

    let aggregates = aggregate(&records, Frequency::Daily).expect("aggregate");
    let warehouses: Vec<(&str, &str, f64)> = aggregates
        .breakdowns
        .get(Dimension::Warehouse)
        .iter()
        .map(|row| (row.item.as_str(), row.value.as_str(), row.quantity))
        .collect();
    assert_eq!(
        warehouses,
        vec![
            ("ALCOHOL", "C", 9.0),
            ("ALCOHOL", "A", 5.0),
            ("ALCOHOL", "B", 5.0),
            ("GUANTES", "A", 1.0),
        ]
    );
    assert_eq!(aggregates.breakdowns.get(Dimension::Prescriber)[0].value, "MUÑOZ");

    let items = serde_json::to_string(&aggregates.items).expect("serialize items");
    insta::assert_snapshot!(items, @r#"[{"ITEM_CRITICO":"ALCOHOL"},{"ITEM_CRITICO":"GUANTES"}]"#);
}

#[test]
fn empty_record_set_yields_empty_artifacts() {
    let aggregates = aggregate(&[], Frequency::Daily).expect("aggregate");
    assert!(aggregates.items.is_empty());
    assert!(aggregates.kpis.is_empty());
    assert!(aggregates.series.is_empty());
    assert!(aggregates.breakdowns.get(Dimension::ServiceUnit).is_empty());
    assert_eq!(aggregates.anchor, None);
}

#[test]
fn writes_all_artifacts() {
    let dir = TempDir::new().expect("temp dir");
    let out_dir = dir.path().join("docs").join("data");
    let records = vec![record(date(2025, 1, 5), "ALCOHOL", 2.0, "CENTRAL")];
    let aggregates = aggregate(&records, Frequency::Daily).expect("aggregate");
    let report = SchemaReport::new("*.parquet", Frequency::Daily, &CriticalPatternTable::default())
        .with_counts(3, 1, aggregates.items.len());

    let paths = write_artifacts(&out_dir, &aggregates, &report).expect("write artifacts");
    assert_eq!(paths.len(), 5);
    for name in [ITEMS_FILE, KPI_FILE, SERIES_FILE, AGG_DIM_FILE, SCHEMA_REPORT_FILE] {
        assert!(out_dir.join(name).is_file(), "{name} missing");
    }

    let agg_dim: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join(AGG_DIM_FILE)).unwrap()).unwrap();
    assert_eq!(agg_dim["almacen"][0]["ALMACEN"], "CENTRAL");
    assert_eq!(agg_dim["servicio"][0]["SERVICIO"], "URGENCIAS");
    assert_eq!(agg_dim["medico"][0]["Q"], 2.0);

    let series: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join(SERIES_FILE)).unwrap()).unwrap();
    assert_eq!(series[0]["PERIODO"], "2025-01-05");

    let schema: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join(SCHEMA_REPORT_FILE)).unwrap())
            .unwrap();
    assert_eq!(schema["rows_read"], 3);
    assert_eq!(schema["items_found"], 1);
    assert_eq!(schema["freq"], "D");
}
