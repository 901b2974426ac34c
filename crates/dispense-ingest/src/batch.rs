//! Batch file loading into Polars DataFrames.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Supported batch file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchFormat {
    Parquet,
    Csv,
}

impl BatchFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("parquet") {
            Some(Self::Parquet)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// One input snapshot: its origin and its untouched contents.
#[derive(Debug, Clone)]
pub struct RawBatch {
    pub path: PathBuf,
    pub file_name: String,
    pub frame: DataFrame,
}

impl RawBatch {
    /// Column headers in file order.
    pub fn headers(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Reads a Parquet or CSV batch file.
///
/// CSV batches are read with every column as text; type coercion happens
/// later, per logical field.
pub fn read_batch(path: &Path) -> Result<RawBatch> {
    let format = BatchFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let frame = match format {
        BatchFormat::Parquet => {
            let file = File::open(path).map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            ParquetReader::new(file)
                .finish()
                .map_err(|e| IngestError::BatchRead {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
        }
        BatchFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| IngestError::BatchRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .finish()
            .map_err(|e| IngestError::BatchRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();

    debug!(
        file = %file_name,
        rows = frame.height(),
        columns = frame.width(),
        "batch loaded"
    );

    Ok(RawBatch {
        path: path.to_path_buf(),
        file_name,
        frame,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            BatchFormat::from_path(Path::new("a/recetas.PARQUET")),
            Some(BatchFormat::Parquet)
        );
        assert_eq!(
            BatchFormat::from_path(Path::new("recetas.csv")),
            Some(BatchFormat::Csv)
        );
        assert_eq!(BatchFormat::from_path(Path::new("recetas.xlsx")), None);
        assert_eq!(BatchFormat::from_path(Path::new("recetas")), None);
    }

    #[test]
    fn test_read_csv_batch_as_text() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "FEC_RECETA,COD_ITEM,CANT_SOL\n2025-01-02,00123,2\n").unwrap();

        let batch = read_batch(file.path()).unwrap();
        assert_eq!(batch.headers(), vec!["FEC_RECETA", "COD_ITEM", "CANT_SOL"]);
        assert_eq!(batch.height(), 1);
        // Leading zeros survive because no schema inference happens.
        let code = batch.frame.column("COD_ITEM").unwrap().str().unwrap().get(0);
        assert_eq!(code, Some("00123"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::new().unwrap();
        let result = read_batch(file.path());
        assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
    }
}
