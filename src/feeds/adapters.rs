//! Per-source adapters normalizing raw feed documents into [`Collection`]s.
//!
//! Each source kind gets its own adapter instead of one shape-sniffing merge:
//! the adapter reconciles the source's metric vocabulary onto the canonical
//! keys, resolves field-level observation times, tags provenance, and attaches
//! display configuration. Downstream merge logic only ever sees the common
//! station shape.

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::feeds::models::{
    BuoyLatestDoc, BuoySeriesDoc, LightstationDoc, RawBuoyLatest, RawMeta, RawSeries,
    WindStationsDoc,
};
use crate::model::{
    Collection, DisplayConfig, Location, MetricSeries, Provenance, Sample, SnapshotMeta, Station,
    metric,
};

/// Map a source-local metric key onto the canonical vocabulary. Unknown keys
/// pass through unchanged so no data is silently dropped.
#[must_use]
pub fn canonical_key(raw: &str) -> &str {
    match raw {
        "wind_speed_kt" => metric::WIND_SPEED,
        "wind_gust_kt" => metric::WIND_GUST,
        "wind_dir_deg" => metric::WIND_DIR,
        "air_temp_c" => metric::AIR_TEMP,
        "water_temp_c" => metric::WATER_TEMP,
        "pressure_hpa" => metric::PRESSURE,
        other => other,
    }
}

/// Display exceptions by station id. Everything else shows the default
/// metric with raw numeric text.
#[must_use]
pub fn display_config_for(id: &str) -> DisplayConfig {
    match id {
        // Halibut Bank reports fractional m/s; its column shows two decimals.
        "46146" => DisplayConfig {
            metric: metric::WIND_SPEED.to_string(),
            decimals: Some(2),
        },
        // Pam Rocks winds are gust-dominated; its column shows gusts.
        "pam-rocks" => DisplayConfig {
            metric: metric::WIND_GUST.to_string(),
            decimals: None,
        },
        _ => DisplayConfig::default(),
    }
}

fn to_time(epoch: i64, context: &str) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp(epoch, 0).ok_or_else(|| {
        AppError::MalformedCollection(format!("invalid timestamp {epoch} in {context}"))
    })
}

fn to_meta(raw: Option<RawMeta>) -> AppResult<SnapshotMeta> {
    let generated_utc = match raw.and_then(|m| m.generated_utc) {
        Some(epoch) => Some(to_time(epoch, "_meta.generated_utc")?),
        None => None,
    };
    Ok(SnapshotMeta { generated_utc })
}

fn to_series(key: &str, raw: &RawSeries, context: &str) -> AppResult<MetricSeries> {
    let mut series = MetricSeries::new(key, raw.unit.clone());
    series.data.reserve(raw.data.len());
    for s in &raw.data {
        series.data.push(Sample {
            time: to_time(s.timestamp, context)?,
            value: s.value,
            gusting: s.gusting,
        });
    }
    // Sources are expected ascending; enforce the invariant regardless.
    series.data.sort_by_key(|s| s.time);
    Ok(series)
}

fn location(lat: Option<f64>, lon: Option<f64>) -> Option<Location> {
    Some(Location {
        lat: lat?,
        lon: lon?,
    })
}

/// Normalize the combined land wind station document.
///
/// # Errors
///
/// Returns `MalformedCollection` on invalid timestamps.
pub fn adapt_wind_stations(doc: &WindStationsDoc) -> AppResult<Collection> {
    let mut out = Collection::new(to_meta(doc.meta)?);
    for (id, raw) in &doc.entries {
        let mut station = Station {
            id: id.clone(),
            name: raw.name.clone(),
            region: raw.region.clone(),
            location: location(raw.lat, raw.lon),
            provenance: Provenance::Land,
            display: display_config_for(id),
            timeseries: std::collections::HashMap::new(),
        };
        for (key, series) in &raw.series {
            let key = canonical_key(key);
            station
                .timeseries
                .insert(key.to_string(), to_series(key, series, id)?);
        }
        out.stations.insert(id.clone(), station);
    }
    Ok(out)
}

/// Resolve the observation time for one field of a latest-snapshot entry:
/// the per-field time when the source exposes one, else the generic
/// observation timestamp.
fn field_time(raw: &RawBuoyLatest, field: &str) -> Option<i64> {
    raw.field_times.get(field).copied().or(raw.timestamp)
}

/// Normalize the latest buoy snapshot: each scalar reading becomes a
/// single-sample series stamped with its resolved observation time.
/// Readings with no resolvable time are unanchored and skipped.
///
/// # Errors
///
/// Returns `MalformedCollection` on invalid timestamps.
pub fn adapt_buoys_latest(doc: &BuoyLatestDoc) -> AppResult<Collection> {
    let mut out = Collection::new(to_meta(doc.meta)?);
    for (id, raw) in &doc.entries {
        let mut station = Station {
            id: id.clone(),
            name: raw.name.clone(),
            region: None,
            location: location(raw.lat, raw.lon),
            provenance: Provenance::Buoy,
            display: display_config_for(id),
            timeseries: std::collections::HashMap::new(),
        };

        let fields: [(&str, Option<f64>, &str); 6] = [
            ("wind_speed_kt", raw.wind_speed_kt, "kt"),
            ("wind_gust_kt", raw.wind_gust_kt, "kt"),
            ("wind_dir_deg", raw.wind_dir_deg, "°"),
            ("air_temp_c", raw.air_temp_c, "°C"),
            ("water_temp_c", raw.water_temp_c, "°C"),
            ("pressure_hpa", raw.pressure_hpa, "hPa"),
        ];

        for (raw_key, value, unit) in fields {
            let Some(epoch) = field_time(raw, raw_key) else {
                if value.is_some() {
                    tracing::warn!(id = %id, field = raw_key, "Dropping unanchored reading");
                }
                continue;
            };
            let key = canonical_key(raw_key);
            let mut series = MetricSeries::new(key, unit);
            series
                .data
                .push(Sample::new(to_time(epoch, id)?, value));
            station.timeseries.insert(key.to_string(), series);
        }
        out.stations.insert(id.clone(), station);
    }
    Ok(out)
}

/// Normalize the multi-hour buoy timeseries document.
///
/// # Errors
///
/// Returns `MalformedCollection` on invalid timestamps.
pub fn adapt_buoys_timeseries(doc: &BuoySeriesDoc) -> AppResult<Collection> {
    let mut out = Collection::new(to_meta(doc.meta)?);
    for (id, raw) in &doc.entries {
        let mut station = Station {
            id: id.clone(),
            name: raw.name.clone(),
            region: None,
            location: location(raw.lat, raw.lon),
            provenance: Provenance::Buoy,
            display: display_config_for(id),
            timeseries: std::collections::HashMap::new(),
        };
        for (key, series) in &raw.series {
            let key = canonical_key(key);
            station
                .timeseries
                .insert(key.to_string(), to_series(key, series, id)?);
        }
        out.stations.insert(id.clone(), station);
    }
    Ok(out)
}

/// Normalize the lightstation timeseries document.
///
/// # Errors
///
/// Returns `MalformedCollection` on invalid timestamps.
pub fn adapt_lightstations(doc: &LightstationDoc) -> AppResult<Collection> {
    let mut out = Collection::new(to_meta(doc.meta)?);
    for (id, raw) in &doc.entries {
        let mut station = Station {
            id: id.clone(),
            name: raw.name.clone(),
            region: raw.region.clone(),
            location: None,
            provenance: Provenance::Lightstation,
            display: display_config_for(id),
            timeseries: std::collections::HashMap::new(),
        };
        for (key, series) in &raw.series {
            let key = canonical_key(key);
            station
                .timeseries
                .insert(key.to_string(), to_series(key, series, id)?);
        }
        out.stations.insert(id.clone(), station);
    }
    Ok(out)
}
