use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::station::Station;

/// Snapshot provenance for freshness computation. Carried next to the station
/// map, never inside it, so no consumer has to filter out a reserved key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub generated_utc: Option<DateTime<Utc>>,
}

/// Keyed set of stations plus snapshot metadata. Station ids are unique;
/// cross-source collisions are surfaced at merge time, never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub meta: SnapshotMeta,
    pub stations: HashMap<String, Station>,
}

impl Collection {
    #[must_use]
    pub fn new(meta: SnapshotMeta) -> Self {
        Self {
            meta,
            stations: HashMap::new(),
        }
    }
}

/// The immutable product of one refresh cycle. A new cycle builds an entirely
/// new set behind its own `Arc`; in-flight reads of the old set stay coherent.
#[derive(Debug, Clone)]
pub struct SnapshotSet {
    /// Merged under the wind-table inclusion policy; feeds the hourly table
    /// and the latest-values summary.
    pub wind_table: Collection,
    /// Merged under the wind-timeseries inclusion policy; feeds chart series.
    pub timeseries: Collection,
    pub fetched_at: DateTime<Utc>,
}
