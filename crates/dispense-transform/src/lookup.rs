//! Code-to-name lookups built from reference tables.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use dispense_ingest::{TextTable, read_optional_text_table};
use dispense_map::find_column;
use dispense_model::{
    CaseInsensitiveSet, ReferenceDomain, ReferenceLayout, ReferenceSource, SourceRole,
};
use tracing::{debug, info, warn};

use crate::normalization::clean_with;

/// Mapping from cleaned code to display name for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupMap {
    entries: HashMap<String, String>,
}

impl LookupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry; later writes replace earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Non-blank name for `key`.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds every entry of `other`, overwriting existing keys.
    pub fn extend(&mut self, other: LookupMap) {
        self.entries.extend(other.entries);
    }

    /// Fills keys that are absent or blank here from `other`.
    pub fn fill_missing(&mut self, other: LookupMap) {
        for (key, value) in other.entries {
            match self.entries.get_mut(&key) {
                Some(existing) if existing.trim().is_empty() => *existing = value,
                Some(_) => {}
                None => {
                    self.entries.insert(key, value);
                }
            }
        }
    }
}

/// Builds the lookup described by `source` from a loaded table.
///
/// Malformed tables yield an empty lookup; they never fail the run.
pub fn build_lookup(table: &TextTable, source: &ReferenceSource) -> LookupMap {
    let mut lookup = LookupMap::new();
    match &source.layout {
        ReferenceLayout::Columns {
            key_aliases,
            value_aliases,
        } => {
            let Some((key_idx, value_idx)) = key_value_columns(table, key_aliases, value_aliases)
            else {
                warn!(
                    file = %source.file_name,
                    columns = table.headers.len(),
                    "reference table needs at least two columns; skipped"
                );
                return lookup;
            };
            for row in 0..table.rows.len() {
                let key = clean_with(source.key_cleaning, table.cell(row, key_idx));
                if key.is_empty() {
                    continue;
                }
                lookup.insert(key, table.cell(row, value_idx).trim());
            }
        }
        ReferenceLayout::Combined { separator } => {
            let joiner = table.separator.to_string();
            // A headerless single-column file puts its first entry in the header row.
            let lines = std::iter::once(&table.headers).chain(table.rows.iter());
            for cells in lines {
                let line = cells.join(&joiner);
                let Some((raw_key, value)) = line.split_once(separator.as_str()) else {
                    continue;
                };
                let key = clean_with(source.key_cleaning, raw_key);
                if key.is_empty() {
                    continue;
                }
                lookup.insert(key, value.trim());
            }
        }
    }
    lookup
}

/// Locates key and value columns by alias, falling back to positions 0 and 1.
fn key_value_columns<S: AsRef<str>>(
    table: &TextTable,
    key_aliases: &[S],
    value_aliases: &[S],
) -> Option<(usize, usize)> {
    if table.headers.len() < 2 {
        return None;
    }
    let observed = CaseInsensitiveSet::new(&table.headers);
    let key_idx = find_column(&observed, key_aliases)
        .and_then(|header| table.column_index(header))
        .unwrap_or(0);
    let value_idx = find_column(&observed, value_aliases)
        .and_then(|header| table.column_index(header))
        .filter(|idx| *idx != key_idx)
        .or_else(|| (0..table.headers.len()).find(|idx| *idx != key_idx))?;
    Some((key_idx, value_idx))
}

/// The lookups for every reference domain.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    domains: BTreeMap<ReferenceDomain, LookupMap>,
}

impl Lookups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup for `domain`, if any source was loaded for it.
    pub fn get(&self, domain: ReferenceDomain) -> Option<&LookupMap> {
        self.domains.get(&domain)
    }

    /// Non-blank name for `key` in `domain`.
    pub fn label(&self, domain: ReferenceDomain, key: &str) -> Option<&str> {
        self.domains.get(&domain)?.label(key)
    }

    /// Merges a built lookup according to the source role.
    pub fn merge(&mut self, domain: ReferenceDomain, role: SourceRole, lookup: LookupMap) {
        let target = self.domains.entry(domain).or_default();
        match role {
            SourceRole::Primary => target.extend(lookup),
            SourceRole::Supplementary => target.fill_missing(lookup),
        }
    }

    /// Entry count per domain, including empty domains.
    pub fn counts(&self) -> BTreeMap<ReferenceDomain, usize> {
        ReferenceDomain::ALL
            .into_iter()
            .map(|domain| (domain, self.get(domain).map_or(0, LookupMap::len)))
            .collect()
    }
}

/// Loads every reference source found under `dir`.
///
/// Absent files leave their domain empty. Unreadable files are logged and
/// skipped. Primary sources are applied before supplementary ones so that a
/// supplementary file only fills gaps.
pub fn load_lookups(dir: &Path, sources: &[ReferenceSource]) -> Lookups {
    let mut lookups = Lookups::new();
    let ordered = sources
        .iter()
        .filter(|s| s.role == SourceRole::Primary)
        .chain(sources.iter().filter(|s| s.role == SourceRole::Supplementary));

    for source in ordered {
        let path = dir.join(&source.file_name);
        let table = match read_optional_text_table(&path) {
            Ok(Some(table)) => table,
            Ok(None) => {
                debug!(domain = %source.domain, file = %source.file_name, "reference file absent");
                continue;
            }
            Err(error) => {
                warn!(domain = %source.domain, file = %source.file_name, %error, "reference file unreadable; skipped");
                continue;
            }
        };
        let lookup = build_lookup(&table, source);
        info!(
            domain = %source.domain,
            file = %source.file_name,
            entries = lookup.len(),
            encoding = table.encoding,
            "reference lookup loaded"
        );
        lookups.merge(source.domain, source.role, lookup);
    }

    lookups
}
