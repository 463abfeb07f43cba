//! Raw wire shapes for the observation feeds.
//!
//! Documents are keyed by station id with a reserved `_meta` entry carrying
//! snapshot provenance. The `_meta` key is peeled off here, at the wire
//! boundary, so it never appears inside any station map downstream.
//!
//! Field-level tolerance, document-level strictness: unknown or absent fields
//! default, but a document that does not parse as its expected shape is a
//! malformed collection, surfaced rather than coerced.

use std::collections::HashMap;

use serde::Deserialize;

/// A feed document: the reserved `_meta` entry plus id-keyed entries.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument<T> {
    #[serde(rename = "_meta", default)]
    pub meta: Option<RawMeta>,
    #[serde(flatten)]
    pub entries: HashMap<String, T>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawMeta {
    /// Epoch seconds when the upstream producer generated the document.
    #[serde(default)]
    pub generated_utc: Option<i64>,
}

/// A sample on the wire: `[epoch_seconds, value|null]` with an optional
/// trailing gusting flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawSampleRepr")]
pub struct RawSample {
    pub timestamp: i64,
    pub value: Option<f64>,
    pub gusting: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawSampleRepr {
    WithFlag(f64, Option<f64>, bool),
    Plain(f64, Option<f64>),
}

impl From<RawSampleRepr> for RawSample {
    fn from(raw: RawSampleRepr) -> Self {
        let (ts, value, gusting) = match raw {
            RawSampleRepr::WithFlag(ts, value, gusting) => (ts, value, gusting),
            RawSampleRepr::Plain(ts, value) => (ts, value, false),
        };
        Self {
            // Upstream timestamps can be floats like 1593038703.8
            timestamp: ts as i64,
            value,
            gusting,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSeries {
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub data: Vec<RawSample>,
}

/// One land wind station in the combined observations document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWindStation {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub series: HashMap<String, RawSeries>,
}

/// One buoy in the latest-snapshot document. Buoys report scalar current
/// conditions under their own vocabulary (`wind_speed_kt`, `wind_dir_deg`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawBuoyLatest {
    pub name: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Generic observation time (epoch seconds); the fallback when no
    /// field-specific time exists.
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Per-field observation times, preferred over `timestamp` when building
    /// metric-specific display values.
    #[serde(default)]
    pub field_times: HashMap<String, i64>,
    #[serde(default)]
    pub wind_speed_kt: Option<f64>,
    #[serde(default)]
    pub wind_gust_kt: Option<f64>,
    #[serde(default)]
    pub wind_dir_deg: Option<f64>,
    #[serde(default)]
    pub air_temp_c: Option<f64>,
    #[serde(default)]
    pub water_temp_c: Option<f64>,
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
}

/// One buoy in the multi-hour timeseries document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBuoySeries {
    pub name: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub series: HashMap<String, RawSeries>,
}

/// One lightstation in the lightstation timeseries document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLightstation {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub series: HashMap<String, RawSeries>,
}

pub type WindStationsDoc = RawDocument<RawWindStation>;
pub type BuoyLatestDoc = RawDocument<RawBuoyLatest>;
pub type BuoySeriesDoc = RawDocument<RawBuoySeries>;
pub type LightstationDoc = RawDocument<RawLightstation>;
