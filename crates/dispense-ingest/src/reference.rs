//! Reference table reading with encoding and separator probing.
//!
//! Reference files are hand-maintained exports: some are UTF-8 (with or
//! without BOM), some Windows-1252, some use `;` as the separator. Each
//! decoding is tried in order and the first one that parses is kept;
//! Windows-1252 is the last resort and always decodes.

use std::borrow::Cow;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Separators probed in order.
const SEPARATORS: [u8; 2] = [b',', b';'];

/// A small text table held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Name of the encoding that decoded the file.
    pub encoding: &'static str,
    /// Field separator that produced the header row.
    pub separator: char,
}

impl TextTable {
    /// Index of the column named `name` (case-insensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    /// Cell at (`row`, `col`), empty when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Decodes bytes as UTF-8, falling back to Windows-1252.
fn decode(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    let without_bom = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(without_bom) {
        return (text, UTF_8.name());
    }
    let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text, WINDOWS_1252.name())
}

fn parse_with(text: &str, separator: u8) -> std::result::Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(separator)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Parses decoded text, probing separators until one yields at least two
/// header columns. Falls back to the comma parse.
fn parse_text(text: &str, path: &Path) -> Result<(Vec<Vec<String>>, u8)> {
    let mut fallback = None;
    for separator in SEPARATORS {
        match parse_with(text, separator) {
            Ok(rows) => {
                let width = rows.first().map_or(0, Vec::len);
                if width >= 2 {
                    return Ok((rows, separator));
                }
                if fallback.is_none() {
                    fallback = Some((rows, separator));
                }
            }
            Err(error) => {
                debug!(path = %path.display(), separator = %char::from(separator), %error, "separator rejected");
            }
        }
    }
    fallback.ok_or_else(|| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: "no separator produced a table".to_string(),
    })
}

/// Reads a reference table from disk.
pub fn read_text_table(path: &Path) -> Result<TextTable> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (text, encoding) = decode(&bytes);
    let (mut rows, separator) = parse_text(&text, path)?;

    let headers = if rows.is_empty() {
        Vec::new()
    } else {
        rows.remove(0).iter().map(|h| normalize_header(h)).collect()
    };

    debug!(
        path = %path.display(),
        encoding,
        separator = %char::from(separator),
        rows = rows.len(),
        "reference table loaded"
    );

    Ok(TextTable {
        headers,
        rows,
        encoding,
        separator: char::from(separator),
    })
}

/// Reads an optional reference table; a missing file yields `None`.
pub fn read_optional_text_table(path: &Path) -> Result<Option<TextTable>> {
    if !path.is_file() {
        debug!(path = %path.display(), "reference file absent");
        return Ok(None);
    }
    read_text_table(path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_bom() {
        let bytes = b"\xEF\xBB\xBFCEDULA,NOMBRE\n";
        let (text, encoding) = decode(bytes);
        assert_eq!(text, "CEDULA,NOMBRE\n");
        assert_eq!(encoding, "UTF-8");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "PEÑA" with Ñ as 0xD1 (invalid as UTF-8)
        let bytes = b"PE\xD1A";
        let (text, encoding) = decode(bytes);
        assert_eq!(text, "PEÑA");
        assert_eq!(encoding, "windows-1252");
    }

    #[test]
    fn test_parse_text_prefers_semicolon_when_comma_gives_one_column() {
        let (rows, separator) = parse_text("COD;NOMBRE\n1;ANA\n", Path::new("x.csv")).unwrap();
        assert_eq!(separator, b';');
        assert_eq!(rows[1], vec!["1", "ANA"]);
    }

    #[test]
    fn test_parse_text_keeps_single_column_comma_parse() {
        let (rows, separator) =
            parse_text("ALMACEN\n10 - CENTRAL\n", Path::new("x.csv")).unwrap();
        assert_eq!(separator, b',');
        assert_eq!(rows, vec![vec!["ALMACEN"], vec!["10 - CENTRAL"]]);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let (rows, _) = parse_text("A,B\n,\n1,2\n", Path::new("x.csv")).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
