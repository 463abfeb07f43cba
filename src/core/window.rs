use chrono::{DateTime, Duration, Utc};

use crate::model::Collection;

/// Restrict a collection to samples within the trailing `hours` window.
///
/// Returns a new collection; the input is never mutated (the same source
/// collection is re-windowed at other durations). Metadata passes through
/// unchanged, and stations with nothing in the window keep their shape with
/// empty data so consumers can still look them up for display.
///
/// `hours <= 0` yields empty data for every metric rather than an error.
#[must_use]
pub fn window_collection(
    collection: &Collection,
    hours: i64,
    now: DateTime<Utc>,
) -> Collection {
    let cutoff = now - Duration::hours(hours.max(0));

    let mut out = Collection::new(collection.meta);
    for (id, station) in &collection.stations {
        let mut station = station.clone();
        for series in station.timeseries.values_mut() {
            if hours <= 0 {
                series.data.clear();
            } else {
                series.data.retain(|s| s.time >= cutoff);
            }
        }
        out.stations.insert(id.clone(), station);
    }
    out
}
