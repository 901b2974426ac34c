//! Row types of the published JSON artifacts.
//!
//! Field names are the contract with the dashboard that reads these files.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One entry of `items.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    #[serde(rename = "ITEM_CRITICO")]
    pub item: String,
}

/// One entry of `kpi.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRow {
    #[serde(rename = "ITEM_CRITICO")]
    pub item: String,
    #[serde(rename = "Q_TOTAL")]
    pub total: f64,
    #[serde(rename = "Q_7D")]
    pub last_7_days: f64,
    #[serde(rename = "Q_30D")]
    pub last_30_days: f64,
    #[serde(rename = "AVG_DAILY_30D")]
    pub avg_daily_30_days: f64,
}

/// One entry of `series_day.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    /// First day of the period, `YYYY-MM-DD`.
    #[serde(rename = "PERIODO")]
    pub period: String,
    #[serde(rename = "ITEM_CRITICO")]
    pub item: String,
    #[serde(rename = "Q")]
    pub quantity: f64,
}

/// Dimensions broken down in `agg_dim.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Warehouse,
    ServiceUnit,
    Prescriber,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Self::Warehouse, Self::ServiceUnit, Self::Prescriber];

    /// Column name inside each breakdown row.
    pub fn column(self) -> &'static str {
        match self {
            Self::Warehouse => "ALMACEN",
            Self::ServiceUnit => "SERVICIO",
            Self::Prescriber => "MEDICO",
        }
    }

    /// Key of the breakdown list in `agg_dim.json`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Warehouse => "almacen",
            Self::ServiceUnit => "servicio",
            Self::Prescriber => "medico",
        }
    }
}

/// One (item, dimension value) total.
#[derive(Debug, Clone, PartialEq)]
pub struct DimRow {
    pub dimension: Dimension,
    pub item: String,
    pub value: String,
    pub quantity: f64,
}

impl Serialize for DimRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("ITEM_CRITICO", &self.item)?;
        map.serialize_entry(self.dimension.column(), &self.value)?;
        map.serialize_entry("Q", &self.quantity)?;
        map.end()
    }
}

/// Contents of `agg_dim.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DimensionBreakdowns {
    pub almacen: Vec<DimRow>,
    pub servicio: Vec<DimRow>,
    pub medico: Vec<DimRow>,
}

impl DimensionBreakdowns {
    pub fn get(&self, dimension: Dimension) -> &[DimRow] {
        match dimension {
            Dimension::Warehouse => &self.almacen,
            Dimension::ServiceUnit => &self.servicio,
            Dimension::Prescriber => &self.medico,
        }
    }

    pub(crate) fn with(mut self, dimension: Dimension, rows: Vec<DimRow>) -> Self {
        match dimension {
            Dimension::Warehouse => self.almacen = rows,
            Dimension::ServiceUnit => self.servicio = rows,
            Dimension::Prescriber => self.medico = rows,
        }
        self
    }
}

/// Everything computed from the unified record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub items: Vec<ItemRow>,
    pub kpis: Vec<KpiRow>,
    pub series: Vec<SeriesRow>,
    pub breakdowns: DimensionBreakdowns,
    /// Latest observed day; KPI windows end here.
    pub anchor: Option<NaiveDate>,
}
