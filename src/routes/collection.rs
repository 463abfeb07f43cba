use axum::{
    extract::{Query, State},
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::core::window::window_collection;
use crate::error::{AppError, AppResult};
use crate::model::{Collection, Provenance};
use crate::routes::{MAX_WINDOW_HOURS, cache};

fn default_hours() -> i64 {
    24
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CollectionParams {
    /// Trailing window in hours (default 24). Zero or negative yields empty
    /// series rather than an error.
    #[serde(default = "default_hours")]
    pub hours: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    /// Upstream snapshot generation time (null if the feed carried none)
    pub generated_utc: Option<DateTime<Utc>>,
    pub window_hours: i64,
    pub stations: Vec<StationSeries>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StationSeries {
    pub id: String,
    pub name: String,
    pub region: Option<String>,
    pub provenance: Provenance,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesData {
    pub metric: String,
    pub unit: String,
    pub times: Vec<DateTime<Utc>>,
    /// Values aligned with times, null for missing readings
    pub values: Vec<Option<f64>>,
    /// Gusting flags aligned with times
    pub gusting: Vec<bool>,
}

fn build_response(windowed: &Collection, window_hours: i64) -> CollectionResponse {
    let mut stations: Vec<StationSeries> = windowed
        .stations
        .values()
        .map(|station| {
            let mut series: Vec<SeriesData> = station
                .timeseries
                .values()
                .map(|s| SeriesData {
                    metric: s.name.clone(),
                    unit: s.unit.clone(),
                    times: s.data.iter().map(|p| p.time).collect(),
                    values: s.data.iter().map(|p| p.value).collect(),
                    gusting: s.data.iter().map(|p| p.gusting).collect(),
                })
                .collect();
            series.sort_by(|a, b| a.metric.cmp(&b.metric));
            StationSeries {
                id: station.id.clone(),
                name: station.name.clone(),
                region: station.region.clone(),
                provenance: station.provenance,
                series,
            }
        })
        .collect();
    stations.sort_by(|a, b| a.id.cmp(&b.id));

    CollectionResponse {
        generated_utc: windowed.meta.generated_utc,
        window_hours,
        stations,
    }
}

/// Get the windowed timeseries collection for charts
#[utoipa::path(
    get,
    path = "/api/collection",
    params(CollectionParams),
    responses(
        (status = 200, description = "Windowed collection", body = CollectionResponse),
        (status = 400, description = "Invalid window"),
        (status = 503, description = "No snapshot loaded yet"),
    ),
    tag = "observations"
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Query(params): Query<CollectionParams>,
) -> AppResult<Response> {
    if params.hours > MAX_WINDOW_HOURS {
        return Err(AppError::BadRequest(format!(
            "Window exceeds maximum of {MAX_WINDOW_HOURS} hours"
        )));
    }

    let key = cache::cache_key("collection", &[&params.hours.to_string()]);
    if let Some(data) = cache::get_cached(&state, &key).await {
        return cache::json_response((*data).clone(), true);
    }

    let snapshot = state.current_snapshot().await?;
    let windowed = window_collection(&snapshot.timeseries, params.hours, Utc::now());
    let response = build_response(&windowed, params.hours);

    cache::cache_and_respond(&state, key, &response, Some(snapshot.fetched_at)).await
}
