//! Batch file discovery.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Lists files in `dir` matching `pattern` (e.g. `*.parquet`).
///
/// Returns files sorted by path. Directories matched by the pattern are
/// skipped. An empty match is an error: the run has no input.
pub fn find_batch_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = format!("{escaped_dir}/{pattern}");
    let entries = glob::glob(&full_pattern).map_err(|e| IngestError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => debug!(path = %path.display(), "skipping non-file match"),
            Err(error) => warn!(%error, "unreadable glob match"),
        }
    }

    files.sort();

    if files.is_empty() {
        return Err(IngestError::NoBatchFiles {
            pattern: pattern.to_string(),
            dir: dir.to_path_buf(),
        });
    }

    Ok(files)
}
