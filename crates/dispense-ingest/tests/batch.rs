//! Tests for batch discovery and loading.

use std::fs::{self, File};

use polars::prelude::*;
use tempfile::TempDir;

use dispense_ingest::{any_to_string, find_batch_files, read_batch};

fn cell_text(frame: &DataFrame, name: &str, idx: usize) -> String {
    frame
        .column(name)
        .ok()
        .and_then(|column| column.get(idx).ok())
        .map(any_to_string)
        .unwrap_or_default()
}

#[test]
fn discovers_and_reads_parquet_batches() {
    let dir = TempDir::new().expect("temp dir");
    let mut frame = df! {
        "FECHA" => ["2025-01-02", "2025-01-03"],
        "COD_PRODUCTO" => [27491.0f64, 118.0],
        "CANTIDAD" => ["2", "3,5"],
    }
    .expect("frame");
    let path = dir.path().join("recetas_2025_01.parquet");
    let file = File::create(&path).expect("create parquet");
    ParquetWriter::new(file).finish(&mut frame).expect("write parquet");
    fs::write(dir.path().join("readme.txt"), "ignored").expect("write txt");

    let files = find_batch_files(dir.path(), "*.parquet").expect("find batches");
    assert_eq!(files, vec![path.clone()]);

    let batch = read_batch(&path).expect("read batch");
    assert_eq!(batch.file_name, "recetas_2025_01.parquet");
    assert_eq!(batch.headers(), vec!["FECHA", "COD_PRODUCTO", "CANTIDAD"]);
    assert_eq!(batch.height(), 2);
    assert_eq!(cell_text(&batch.frame, "COD_PRODUCTO", 0), "27491.0");
    assert_eq!(cell_text(&batch.frame, "CANTIDAD", 1), "3,5");
    assert_eq!(cell_text(&batch.frame, "MISSING", 0), "");
}
