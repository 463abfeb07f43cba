use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::core::sort::{SortKey, sort_rows};
use crate::error::{AppError, AppResult};
use crate::model::{Provenance, metric};

fn default_sort() -> String {
    "name".to_string()
}

fn default_dir() -> String {
    "asc".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StationsParams {
    /// Sort column: name, region, wind_speed, wind_gust, wind_dir, observed_at
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Sort direction: asc or desc
    #[serde(default = "default_dir")]
    pub dir: String,
}

/// One row of the latest-values summary table.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StationRow {
    pub id: String,
    pub name: String,
    pub region: Option<String>,
    pub provenance: Provenance,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_dir: Option<f64>,
    /// Observation time of the latest wind-speed reading
    pub observed_at: Option<DateTime<Utc>>,
}

fn sort_key_for(row: &StationRow, column: &str) -> Option<SortKey> {
    match column {
        "name" => Some(SortKey::Text(row.name.clone())),
        "region" => row.region.clone().map(SortKey::Text),
        "wind_speed" => row.wind_speed.map(SortKey::Number),
        "wind_gust" => row.wind_gust.map(SortKey::Number),
        "wind_dir" => row.wind_dir.map(SortKey::Number),
        "observed_at" => row.observed_at.map(SortKey::Date),
        _ => None,
    }
}

const SORT_COLUMNS: &[&str] = &[
    "name",
    "region",
    "wind_speed",
    "wind_gust",
    "wind_dir",
    "observed_at",
];

/// List stations with their latest wind readings, sorted server-side
#[utoipa::path(
    get,
    path = "/api/stations",
    params(StationsParams),
    responses(
        (status = 200, description = "Station summary rows", body = Vec<StationRow>),
        (status = 400, description = "Unknown sort column"),
        (status = 503, description = "No snapshot loaded yet"),
    ),
    tag = "stations"
)]
pub async fn list_stations(
    State(state): State<AppState>,
    Query(params): Query<StationsParams>,
) -> AppResult<Json<Vec<StationRow>>> {
    if !SORT_COLUMNS.contains(&params.sort.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown sort column '{}'",
            params.sort
        )));
    }
    let ascending = match params.dir.as_str() {
        "asc" => true,
        "desc" => false,
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown sort direction '{other}'"
            )));
        }
    };

    let snapshot = state.current_snapshot().await?;

    let mut rows: Vec<StationRow> = snapshot
        .wind_table
        .stations
        .values()
        .map(|station| {
            let latest = |key: &str| {
                station
                    .series(key)
                    .and_then(|s| s.latest_value())
                    .and_then(|s| s.value)
            };
            StationRow {
                id: station.id.clone(),
                name: station.name.clone(),
                region: station.region.clone(),
                provenance: station.provenance,
                wind_speed: latest(metric::WIND_SPEED),
                wind_gust: latest(metric::WIND_GUST),
                wind_dir: latest(metric::WIND_DIR),
                observed_at: station
                    .series(metric::WIND_SPEED)
                    .and_then(|s| s.latest_value())
                    .map(|s| s.time),
            }
        })
        .collect();

    // Pre-sort by id so equal sort keys keep a deterministic, stable order
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    sort_rows(&mut rows, |row| sort_key_for(row, &params.sort), ascending);

    Ok(Json(rows))
}
