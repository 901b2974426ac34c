//! Reference (lookup) domains and where their source tables live.

use std::fmt;

use serde::Serialize;

/// One category of reference data mapping codes to display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceDomain {
    Product,
    Prescriber,
    Patient,
    Warehouse,
}

impl ReferenceDomain {
    pub const ALL: [ReferenceDomain; 4] = [
        Self::Product,
        Self::Prescriber,
        Self::Patient,
        Self::Warehouse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Prescriber => "prescriber",
            Self::Patient => "patient",
            Self::Warehouse => "warehouse",
        }
    }
}

impl fmt::Display for ReferenceDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How identifier strings are cleaned before use as lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeCleaning {
    /// Undo float corruption (`"27491.0"` -> `"27491"`).
    #[default]
    Numeric,
    /// Trim only; for catalog codes that may be non-numeric.
    Trim,
}

/// Physical layout of a reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceLayout {
    /// Separate key and value columns located by alias, falling back to the
    /// first two columns.
    Columns {
        key_aliases: Vec<String>,
        value_aliases: Vec<String>,
    },
    /// A single column holding `key<separator>value`.
    Combined { separator: String },
}

/// Whether a source defines a domain or only fills its gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    Primary,
    Supplementary,
}

/// A well-known reference file feeding one lookup domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSource {
    pub domain: ReferenceDomain,
    pub file_name: String,
    pub layout: ReferenceLayout,
    pub key_cleaning: CodeCleaning,
    pub role: SourceRole,
}

impl ReferenceSource {
    fn columns(
        domain: ReferenceDomain,
        file_name: &str,
        key_aliases: &[&str],
        value_aliases: &[&str],
        key_cleaning: CodeCleaning,
        role: SourceRole,
    ) -> Self {
        Self {
            domain,
            file_name: file_name.to_string(),
            layout: ReferenceLayout::Columns {
                key_aliases: key_aliases.iter().map(|s| (*s).to_string()).collect(),
                value_aliases: value_aliases.iter().map(|s| (*s).to_string()).collect(),
            },
            key_cleaning,
            role,
        }
    }
}

/// The reference files the pipeline looks for in the repository directory.
pub fn default_reference_sources() -> Vec<ReferenceSource> {
    vec![
        ReferenceSource::columns(
            ReferenceDomain::Product,
            "recetas2025_codigosproductos.csv",
            &["COD_PRODUCTO", "CODIGO_PRODUCTO", "COD_PROD", "CODIGO", "COD"],
            &["DESC_PRODUCTO", "DESCRIPCION", "NOMBRE_PRODUCTO", "PRODUCTO", "NOMBRE"],
            CodeCleaning::Trim,
            SourceRole::Primary,
        ),
        ReferenceSource::columns(
            ReferenceDomain::Prescriber,
            "recetas2025_codigosmedicos.csv",
            &["COD_MEDICO", "COD_PROF", "CODIGO", "COD"],
            &["MEDICO", "NOMBRE_MEDICO", "NOMBRE", "PROFESIONAL"],
            CodeCleaning::Numeric,
            SourceRole::Primary,
        ),
        ReferenceSource::columns(
            ReferenceDomain::Patient,
            "recetas2025_cedulapacientes.csv",
            &["CEDULA", "CI", "NRO_DOC", "DOCUMENTO"],
            &["PACIENTE", "NOMBRE_PACIENTE", "NOMBRE", "NOMBRES"],
            CodeCleaning::Numeric,
            SourceRole::Primary,
        ),
        ReferenceSource::columns(
            ReferenceDomain::Patient,
            "recetas2025_cedularecurrentes.csv",
            &["CEDULA", "CI", "NRO_DOC", "DOCUMENTO"],
            &["PACIENTE", "NOMBRE_PACIENTE", "NOMBRE", "NOMBRES"],
            CodeCleaning::Numeric,
            SourceRole::Supplementary,
        ),
        ReferenceSource {
            domain: ReferenceDomain::Warehouse,
            file_name: "recetas2025_codigosalmacenes.csv".to_string(),
            layout: ReferenceLayout::Combined {
                separator: "-".to_string(),
            },
            key_cleaning: CodeCleaning::Numeric,
            role: SourceRole::Primary,
        },
    ]
}
