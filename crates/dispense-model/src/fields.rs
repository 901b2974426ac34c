//! Logical fields and the per-batch column binding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A semantic data element that may appear under varying header names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Date,
    ProductCode,
    Quantity,
    Warehouse,
    ServiceUnit,
    PrescriberCode,
    PatientId,
    ProductDescription,
}

impl LogicalField {
    /// Fields every batch must provide.
    pub const REQUIRED: [LogicalField; 3] = [Self::Date, Self::ProductCode, Self::Quantity];

    /// Fields that resolve to absent when no alias matches.
    pub const OPTIONAL: [LogicalField; 5] = [
        Self::Warehouse,
        Self::ServiceUnit,
        Self::PrescriberCode,
        Self::PatientId,
        Self::ProductDescription,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::ProductCode => "product_code",
            Self::Quantity => "quantity",
            Self::Warehouse => "warehouse",
            Self::ServiceUnit => "service_unit",
            Self::PrescriberCode => "prescriber_code",
            Self::PatientId => "patient_id",
            Self::ProductDescription => "product_description",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved binding from logical fields to observed headers for one batch.
///
/// Only the column resolver constructs this, so the required headers are
/// always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub date: String,
    pub product_code: String,
    pub quantity: String,
    pub warehouse: Option<String>,
    pub service_unit: Option<String>,
    pub prescriber_code: Option<String>,
    pub patient_id: Option<String>,
    pub product_description: Option<String>,
}

impl ColumnMap {
    /// Returns the header bound to `field`, if any.
    pub fn header(&self, field: LogicalField) -> Option<&str> {
        match field {
            LogicalField::Date => Some(self.date.as_str()),
            LogicalField::ProductCode => Some(self.product_code.as_str()),
            LogicalField::Quantity => Some(self.quantity.as_str()),
            LogicalField::Warehouse => self.warehouse.as_deref(),
            LogicalField::ServiceUnit => self.service_unit.as_deref(),
            LogicalField::PrescriberCode => self.prescriber_code.as_deref(),
            LogicalField::PatientId => self.patient_id.as_deref(),
            LogicalField::ProductDescription => self.product_description.as_deref(),
        }
    }

    /// All bound headers, required fields first.
    pub fn bound_headers(&self) -> Vec<(LogicalField, &str)> {
        LogicalField::REQUIRED
            .iter()
            .chain(LogicalField::OPTIONAL.iter())
            .filter_map(|field| self.header(*field).map(|header| (*field, header)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_and_optional_are_disjoint() {
        for field in LogicalField::REQUIRED {
            assert!(field.is_required());
            assert!(!LogicalField::OPTIONAL.contains(&field));
        }
        for field in LogicalField::OPTIONAL {
            assert!(!field.is_required());
        }
    }

    #[test]
    fn bound_headers_skip_absent_optionals() {
        let map = ColumnMap {
            date: "FEC_RECETA".to_string(),
            product_code: "COD_ITEM".to_string(),
            quantity: "CANT_SOL".to_string(),
            warehouse: None,
            service_unit: Some("SALA".to_string()),
            prescriber_code: None,
            patient_id: None,
            product_description: None,
        };
        let bound = map.bound_headers();
        assert_eq!(bound.len(), 4);
        assert_eq!(bound[3], (LogicalField::ServiceUnit, "SALA"));
        assert_eq!(map.header(LogicalField::Warehouse), None);
    }
}
