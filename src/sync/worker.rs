use chrono::Utc;

use crate::core::merge::{InclusionPolicy, merge_collections};
use crate::error::AppResult;
use crate::feeds::FeedClient;
use crate::feeds::adapters::{
    adapt_buoys_latest, adapt_buoys_timeseries, adapt_lightstations, adapt_wind_stations,
};
use crate::model::SnapshotSet;

/// Run one refresh cycle: fetch every required feed, normalize each source,
/// and build the merged collections.
///
/// All fetches run concurrently and are joined before any merge begins; if
/// any required fetch fails, the whole cycle fails and nothing partial is
/// produced. The land-station collection is the merge primary for both views;
/// the latest buoy snapshot feeds the table merge while the multi-hour buoy
/// series feeds the timeseries merge, each under its own inclusion policy.
///
/// # Errors
///
/// Propagates fetch, parse, and merge errors from any feed.
pub async fn load_snapshot_set(client: &FeedClient) -> AppResult<SnapshotSet> {
    let (wind_doc, buoys_latest_doc, buoys_series_doc, lightstation_doc) = tokio::try_join!(
        client.get_wind_stations(),
        client.get_buoys_latest(),
        client.get_buoys_timeseries(),
        client.get_lightstations(),
    )?;

    let land = adapt_wind_stations(&wind_doc)?;
    let buoys_latest = adapt_buoys_latest(&buoys_latest_doc)?;
    let buoys_series = adapt_buoys_timeseries(&buoys_series_doc)?;
    let lightstations = adapt_lightstations(&lightstation_doc)?;

    let wind_table = merge_collections(
        &land,
        &[&buoys_latest, &lightstations],
        InclusionPolicy::WindTable,
    )?;
    let timeseries = merge_collections(
        &land,
        &[&buoys_series, &lightstations],
        InclusionPolicy::WindTimeseries,
    )?;

    tracing::debug!(
        land = land.stations.len(),
        buoys = buoys_latest.stations.len(),
        lightstations = lightstations.stations.len(),
        wind_table = wind_table.stations.len(),
        timeseries = timeseries.stations.len(),
        "Built snapshot set"
    );

    Ok(SnapshotSet {
        wind_table,
        timeseries,
        fetched_at: Utc::now(),
    })
}
