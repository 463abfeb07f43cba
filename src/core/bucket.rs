use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, DurationRound, TimeDelta, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::Collection;

/// Rendered in place of an absent value. Never blank, never zero.
pub const PLACEHOLDER: &str = "–";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColumnInfo {
    pub station_id: String,
    pub name: String,
    pub metric: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableRow {
    /// Bucket key: sample time truncated down to the hour.
    pub hour: DateTime<Utc>,
    /// Display label; repeats the date only when the calendar day changes
    /// from the previous row in display order.
    pub label: String,
    /// Raw values aligned to the column list.
    pub values: Vec<Option<f64>>,
    /// Formatted display text aligned to the column list.
    pub text: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HourlyTable {
    pub columns: Vec<ColumnInfo>,
    /// Rows sorted by hour descending (most recent first).
    pub rows: Vec<TableRow>,
    /// First `visible_rows` rows are shown by default; the rest sit behind
    /// an explicit expand action.
    pub visible_rows: usize,
    pub has_hidden: bool,
}

fn truncate_hour(time: DateTime<Utc>) -> DateTime<Utc> {
    time.duration_trunc(TimeDelta::hours(1)).unwrap_or(time)
}

fn format_value(value: Option<f64>, decimals: Option<u8>) -> String {
    match value {
        Some(v) => match decimals {
            Some(d) => format!("{v:.prec$}", prec = usize::from(d)),
            None => v.to_string(),
        },
        None => PLACEHOLDER.to_string(),
    }
}

/// Build the hourly summary table for an explicit ordered list of station ids.
///
/// Columns are a curated subset, not "all stations": unknown ids and stations
/// lacking their designated display metric degrade to an all-placeholder
/// column rather than failing the table. Each column shows the station's
/// configured display metric. Samples are bucketed by hour-truncated
/// timestamp; when several samples land in the same hour for one station, the
/// last one wins (sources are pre-sorted ascending, so that is the newest).
///
/// Pagination is a fixed 50/50 policy: `ceil(rows / 2)` rows are visible by
/// default regardless of the window duration.
#[must_use]
pub fn build_hourly_table(collection: &Collection, column_ids: &[&str]) -> HourlyTable {
    let columns: Vec<ColumnInfo> = column_ids
        .iter()
        .map(|id| {
            let station = collection.stations.get(*id);
            let metric = station
                .map(|s| s.display.metric.clone())
                .unwrap_or_default();
            ColumnInfo {
                station_id: (*id).to_string(),
                name: station.map_or_else(|| (*id).to_string(), |s| s.name.clone()),
                unit: station
                    .and_then(|s| s.series(&metric))
                    .map(|series| series.unit.clone()),
                metric,
            }
        })
        .collect();

    // hour -> values aligned to columns
    let mut buckets: BTreeMap<DateTime<Utc>, Vec<Option<f64>>> = BTreeMap::new();

    for (col, id) in column_ids.iter().enumerate() {
        let Some(station) = collection.stations.get(*id) else {
            continue;
        };
        let Some(series) = station.series(&station.display.metric) else {
            continue;
        };
        for sample in &series.data {
            let hour = truncate_hour(sample.time);
            let row = buckets
                .entry(hour)
                .or_insert_with(|| vec![None; column_ids.len()]);
            // Last sample in the hour wins.
            row[col] = sample.value;
        }
    }

    let decimals: Vec<Option<u8>> = column_ids
        .iter()
        .map(|id| {
            collection
                .stations
                .get(*id)
                .and_then(|s| s.display.decimals)
        })
        .collect();

    // Most recent first; labels computed over this same order, before any
    // pagination split.
    let mut rows: Vec<TableRow> = Vec::with_capacity(buckets.len());
    let mut prev_day: Option<i32> = None;
    for (hour, values) in buckets.into_iter().rev() {
        let day = hour.num_days_from_ce();
        let label = if prev_day == Some(day) {
            hour.format("%H:00").to_string()
        } else {
            hour.format("%-d %b %H:00").to_string()
        };
        prev_day = Some(day);

        let text = values
            .iter()
            .zip(&decimals)
            .map(|(v, d)| format_value(*v, *d))
            .collect();
        rows.push(TableRow {
            hour,
            label,
            values,
            text,
        });
    }

    let visible_rows = rows.len().div_ceil(2);
    let has_hidden = rows.len() > visible_rows;

    HourlyTable {
        columns,
        rows,
        visible_rows,
        has_hidden,
    }
}
