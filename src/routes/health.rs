use axum::http::StatusCode;

/// Liveness probe
///
/// Answers 200 as soon as the process is serving, even before the first
/// refresh cycle has published a snapshot. Data readiness is signalled
/// separately: the /api routes return 503 until a snapshot exists, and
/// /api/freshness reports its age.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Process is up and serving"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
