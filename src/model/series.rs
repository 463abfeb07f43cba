use serde::{Deserialize, Serialize};

use crate::model::sample::Sample;

/// Canonical metric keys. Adapters reconcile per-source vocabularies
/// (e.g. buoy `wind_speed_kt`) onto these before anything downstream runs.
pub mod metric {
    pub const WIND_SPEED: &str = "wind_speed";
    pub const WIND_GUST: &str = "wind_gust";
    pub const WIND_DIR: &str = "wind_dir";
    pub const AIR_TEMP: &str = "air_temp";
    pub const WATER_TEMP: &str = "water_temp";
    pub const PRESSURE: &str = "pressure";
}

/// One named, unit-tagged sequence of samples for one station.
/// Data is ascending by time and not necessarily contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub unit: String,
    pub data: Vec<Sample>,
}

impl MetricSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            data: Vec::new(),
        }
    }

    /// True if the series holds at least one non-null reading.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.data.iter().any(|s| s.value.is_some())
    }

    /// Most recent non-null reading, if any.
    #[must_use]
    pub fn latest_value(&self) -> Option<&Sample> {
        self.data.iter().rev().find(|s| s.value.is_some())
    }
}
