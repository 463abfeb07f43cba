use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::series::{MetricSeries, metric};

/// Which source kind a station came from. Tagged once by the adapter so
/// renderers never re-derive it from field shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Land,
    Buoy,
    Lightstation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Per-station display configuration for the hourly table: which metric the
/// station's column shows and whether values get fixed decimal places.
/// Exceptions live in adapter configuration data, not in identity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub metric: String,
    pub decimals: Option<u8>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            metric: metric::WIND_SPEED.to_string(),
            decimals: None,
        }
    }
}

/// A single observation source: land station, buoy, or lightstation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    pub provenance: Provenance,
    #[serde(default)]
    pub display: DisplayConfig,
    pub timeseries: HashMap<String, MetricSeries>,
}

impl Station {
    #[must_use]
    pub fn series(&self, key: &str) -> Option<&MetricSeries> {
        self.timeseries.get(key)
    }

    /// True if the station has at least one non-null sample for `key`.
    #[must_use]
    pub fn has_reading(&self, key: &str) -> bool {
        self.series(key).is_some_and(MetricSeries::has_values)
    }

    /// True if the station has a non-empty series for `key`, null or not.
    #[must_use]
    pub fn has_series(&self, key: &str) -> bool {
        self.series(key).is_some_and(|s| !s.data.is_empty())
    }
}
