//! Aggregation of the unified record set with Polars lazy queries.

use chrono::{Datelike, NaiveDate};
use dispense_model::{EnrichedRecord, Frequency};
use polars::prelude::*;
use tracing::{debug, info};

use crate::artifacts::{
    Aggregates, Dimension, DimRow, DimensionBreakdowns, ItemRow, KpiRow, SeriesRow,
};
use crate::error::Result;

const ITEM: &str = "ITEM_CRITICO";
const QUANTITY: &str = "CANTIDAD";
const DAY: &str = "DAY";
const PERIOD: &str = "PERIODO";
const Q: &str = "Q";
const Q_TOTAL: &str = "Q_TOTAL";
const Q_7D: &str = "Q_7D";
const Q_30D: &str = "Q_30D";
const AVG_DAILY_30D: &str = "AVG_DAILY_30D";

/// Trailing window lengths, both ending on the anchor day.
const SHORT_WINDOW_DAYS: i32 = 7;
const LONG_WINDOW_DAYS: i32 = 30;

fn day_number(day: NaiveDate) -> i32 {
    day.num_days_from_ce()
}

/// Builds the columnar view of `records` used by every aggregation.
///
/// `PERIODO` holds the ISO date of the frequency bucket; `DAY` is a day
/// ordinal for window filters.
pub fn records_frame(records: &[EnrichedRecord], frequency: Frequency) -> PolarsResult<DataFrame> {
    let items: Vec<&str> = records.iter().map(|r| r.item.as_str()).collect();
    let quantities: Vec<Option<f64>> = records.iter().map(|r| r.quantity).collect();
    let days: Vec<i32> = records.iter().map(|r| day_number(r.day)).collect();
    let periods: Vec<String> = records
        .iter()
        .map(|r| frequency.bucket(r.day).format("%Y-%m-%d").to_string())
        .collect();
    let warehouses: Vec<&str> = records.iter().map(|r| r.warehouse.as_str()).collect();
    let services: Vec<&str> = records.iter().map(|r| r.service_unit.as_str()).collect();
    let prescribers: Vec<&str> = records.iter().map(|r| r.prescriber.as_str()).collect();

    DataFrame::new(vec![
        Column::new(ITEM.into(), items),
        Column::new(QUANTITY.into(), quantities),
        Column::new(DAY.into(), days),
        Column::new(PERIOD.into(), periods),
        Column::new(Dimension::Warehouse.column().into(), warehouses),
        Column::new(Dimension::ServiceUnit.column().into(), services),
        Column::new(Dimension::Prescriber.column().into(), prescribers),
    ])
}

fn str_at(ca: &StringChunked, idx: usize) -> String {
    ca.get(idx).unwrap_or_default().to_string()
}

fn f64_at(ca: &Float64Chunked, idx: usize) -> f64 {
    ca.get(idx).unwrap_or(0.0)
}

fn series_rows(frame: &DataFrame) -> Result<Vec<SeriesRow>> {
    let grouped = frame
        .clone()
        .lazy()
        .group_by([col(PERIOD), col(ITEM)])
        .agg([col(QUANTITY).sum().alias(Q)])
        .sort_by_exprs([col(PERIOD), col(ITEM)], SortMultipleOptions::default())
        .collect()?;

    let periods = grouped.column(PERIOD)?.str()?;
    let items = grouped.column(ITEM)?.str()?;
    let quantities = grouped.column(Q)?.f64()?;
    Ok((0..grouped.height())
        .map(|i| SeriesRow {
            period: str_at(periods, i),
            item: str_at(items, i),
            quantity: f64_at(quantities, i),
        })
        .collect())
}

fn breakdown_rows(frame: &DataFrame, dimension: Dimension) -> Result<Vec<DimRow>> {
    let value = dimension.column();
    let grouped = frame
        .clone()
        .lazy()
        .group_by([col(ITEM), col(value)])
        .agg([col(QUANTITY).sum().alias(Q)])
        .sort_by_exprs(
            [col(ITEM), col(Q), col(value)],
            SortMultipleOptions::default().with_order_descending_multi([false, true, false]),
        )
        .collect()?;

    let items = grouped.column(ITEM)?.str()?;
    let values = grouped.column(value)?.str()?;
    let quantities = grouped.column(Q)?.f64()?;
    Ok((0..grouped.height())
        .map(|i| DimRow {
            dimension,
            item: str_at(items, i),
            value: str_at(values, i),
            quantity: f64_at(quantities, i),
        })
        .collect())
}

fn kpi_rows(frame: &DataFrame, anchor: NaiveDate) -> Result<Vec<KpiRow>> {
    let anchor = day_number(anchor);
    let window_sum = |days: i32| {
        col(QUANTITY)
            .filter(col(DAY).gt_eq(lit(anchor - days + 1)))
            .sum()
    };

    let grouped = frame
        .clone()
        .lazy()
        .group_by([col(ITEM)])
        .agg([
            col(QUANTITY).sum().alias(Q_TOTAL),
            window_sum(SHORT_WINDOW_DAYS).alias(Q_7D),
            window_sum(LONG_WINDOW_DAYS).alias(Q_30D),
        ])
        .with_column((col(Q_30D) / lit(f64::from(LONG_WINDOW_DAYS))).alias(AVG_DAILY_30D))
        .sort_by_exprs(
            [col(Q_TOTAL), col(ITEM)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let items = grouped.column(ITEM)?.str()?;
    let totals = grouped.column(Q_TOTAL)?.f64()?;
    let short = grouped.column(Q_7D)?.f64()?;
    let long = grouped.column(Q_30D)?.f64()?;
    let average = grouped.column(AVG_DAILY_30D)?.f64()?;
    Ok((0..grouped.height())
        .map(|i| KpiRow {
            item: str_at(items, i),
            total: f64_at(totals, i),
            last_7_days: f64_at(short, i),
            last_30_days: f64_at(long, i),
            avg_daily_30_days: f64_at(average, i),
        })
        .collect())
}

/// Computes every artifact from the unified record set.
///
/// An empty record set yields empty artifacts and no anchor.
pub fn aggregate(records: &[EnrichedRecord], frequency: Frequency) -> Result<Aggregates> {
    let Some(anchor) = records.iter().map(|r| r.day).max() else {
        info!("no records kept; artifacts will be empty");
        return Ok(Aggregates::default());
    };

    let frame = records_frame(records, frequency)?;
    debug!(rows = frame.height(), %anchor, frequency = %frequency, "aggregating records");

    let series = series_rows(&frame)?;
    let mut breakdowns = DimensionBreakdowns::default();
    for dimension in Dimension::ALL {
        breakdowns = breakdowns.with(dimension, breakdown_rows(&frame, dimension)?);
    }
    let kpis = kpi_rows(&frame, anchor)?;

    let mut labels: Vec<String> = kpis.iter().map(|k| k.item.clone()).collect();
    labels.sort();
    labels.dedup();
    let items = labels.into_iter().map(|item| ItemRow { item }).collect();

    Ok(Aggregates {
        items,
        kpis,
        series,
        breakdowns,
        anchor: Some(anchor),
    })
}
