//! Column resolver implementation.

use dispense_model::{CaseInsensitiveSet, ColumnMap, LogicalField, SynonymTable};
use tracing::debug;

use crate::error::MappingError;

/// Returns the observed header matching the first alias that is present.
///
/// Matching is exact and case-insensitive; the observed spelling is returned.
pub fn find_column<'a, S: AsRef<str>>(
    observed: &'a CaseInsensitiveSet,
    aliases: &[S],
) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|alias| observed.get(alias.as_ref().trim()))
}

/// Binds logical fields to the headers of one batch.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    synonyms: SynonymTable,
}

impl ColumnResolver {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Resolves every logical field against `headers`.
    ///
    /// Required fields never share a header: an alias whose header is
    /// already bound to an earlier required field is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MissingRequiredColumns`] naming every
    /// unresolved required field together with the observed headers.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnMap, MappingError> {
        let observed = CaseInsensitiveSet::new(headers);

        let mut bound: Vec<&str> = Vec::new();
        let mut missing = Vec::new();
        let mut required = Vec::with_capacity(LogicalField::REQUIRED.len());
        for field in LogicalField::REQUIRED {
            let header = self
                .synonyms
                .aliases(field)
                .iter()
                .filter_map(|alias| observed.get(alias.trim()))
                .find(|header| !bound.contains(header));
            match header {
                Some(header) => {
                    bound.push(header);
                    required.push(header.to_string());
                }
                None => {
                    missing.push(field);
                    required.push(String::new());
                }
            }
        }

        if !missing.is_empty() {
            return Err(MappingError::MissingRequiredColumns {
                missing,
                observed: headers.to_vec(),
            });
        }

        let optional = |field: LogicalField| {
            find_column(&observed, self.synonyms.aliases(field)).map(str::to_string)
        };

        let mut required = required.into_iter();
        let map = ColumnMap {
            date: required.next().unwrap_or_default(),
            product_code: required.next().unwrap_or_default(),
            quantity: required.next().unwrap_or_default(),
            warehouse: optional(LogicalField::Warehouse),
            service_unit: optional(LogicalField::ServiceUnit),
            prescriber_code: optional(LogicalField::PrescriberCode),
            patient_id: optional(LogicalField::PatientId),
            product_description: optional(LogicalField::ProductDescription),
        };

        for (field, header) in map.bound_headers() {
            debug!(field = %field, header, "column resolved");
        }

        Ok(map)
    }
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new(SynonymTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn find_column_prefers_alias_order() {
        let observed = CaseInsensitiveSet::new(["cod", "Cod_Producto"]);
        let found = find_column(&observed, &["COD_PRODUCTO", "COD"]);
        assert_eq!(found, Some("Cod_Producto"));
    }

    #[test]
    fn required_fields_do_not_share_a_header() {
        let synonyms = SynonymTable::empty()
            .with_aliases(LogicalField::Date, ["FECHA"])
            .with_aliases(LogicalField::ProductCode, ["COD", "ITEM"])
            .with_aliases(LogicalField::Quantity, ["COD", "CANT"]);
        let map = ColumnResolver::new(synonyms)
            .resolve(&headers(&["FECHA", "COD", "CANT"]))
            .unwrap();
        assert_eq!(map.product_code, "COD");
        assert_eq!(map.quantity, "CANT");
    }
}
