use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;
use crate::core::freshness::{Freshness, evaluate};
use crate::error::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct FreshnessResponse {
    #[serde(flatten)]
    pub freshness: Freshness,
    /// True when the last refresh cycle failed; the data shown is the last
    /// good snapshot.
    pub refresh_warning: bool,
    pub refresh_error: Option<String>,
}

/// Staleness of the current snapshot plus the refresh warning indicator
#[utoipa::path(
    get,
    path = "/api/freshness",
    responses(
        (status = 200, description = "Snapshot freshness", body = FreshnessResponse),
    ),
    tag = "stations"
)]
pub async fn get_freshness(State(state): State<AppState>) -> AppResult<Json<FreshnessResponse>> {
    // Answer even before the first successful refresh: no snapshot means no
    // timestamp, which evaluates to stale.
    let generated_utc = state
        .current_snapshot()
        .await
        .ok()
        .and_then(|snap| snap.wind_table.meta.generated_utc);

    let freshness = evaluate(Utc::now(), generated_utc);

    let status = state.refresh_status.read().await;
    Ok(Json(FreshnessResponse {
        freshness,
        refresh_warning: status.failed,
        refresh_error: status.last_error.clone(),
    }))
}
