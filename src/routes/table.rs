use axum::{
    extract::{Query, State},
    response::Response,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::core::bucket::{HourlyTable, build_hourly_table};
use crate::core::window::window_collection;
use crate::error::{AppError, AppResult};
use crate::routes::{MAX_WINDOW_HOURS, cache};

fn default_hours() -> i64 {
    24
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TableParams {
    /// Trailing window in hours (default 24)
    #[serde(default = "default_hours")]
    pub hours: i64,
    /// Comma-separated ordered station ids forming the table columns
    pub columns: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableResponse {
    pub window_hours: i64,
    #[serde(flatten)]
    pub table: HourlyTable,
}

/// Get the hourly bucketed observation table
#[utoipa::path(
    get,
    path = "/api/table",
    params(TableParams),
    responses(
        (status = 200, description = "Hourly table", body = TableResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 503, description = "No snapshot loaded yet"),
    ),
    tag = "observations"
)]
pub async fn get_table(
    State(state): State<AppState>,
    Query(params): Query<TableParams>,
) -> AppResult<Response> {
    if params.hours > MAX_WINDOW_HOURS {
        return Err(AppError::BadRequest(format!(
            "Window exceeds maximum of {MAX_WINDOW_HOURS} hours"
        )));
    }

    let column_ids: Vec<&str> = params
        .columns
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if column_ids.is_empty() {
        return Err(AppError::BadRequest(
            "At least one column station id is required".to_string(),
        ));
    }

    let key = cache::cache_key("table", &[&params.hours.to_string(), &params.columns]);
    if let Some(data) = cache::get_cached(&state, &key).await {
        return cache::json_response((*data).clone(), true);
    }

    let snapshot = state.current_snapshot().await?;
    let windowed = window_collection(&snapshot.wind_table, params.hours, Utc::now());
    let table = build_hourly_table(&windowed, &column_ids);
    let response = TableResponse {
        window_hours: params.hours,
        table,
    };

    cache::cache_and_respond(&state, key, &response, Some(snapshot.fetched_at)).await
}
