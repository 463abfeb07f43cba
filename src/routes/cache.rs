use axum::{
    http::{HeaderValue, header},
    response::Response,
};
use serde::Serialize;
use std::sync::Arc;

use crate::common::{AppState, CachedResponse};
use crate::error::{AppError, AppResult};

/// Build a cache key from components
pub fn cache_key(prefix: &str, components: &[&str]) -> String {
    let mut key = prefix.to_string();
    for c in components {
        key.push(':');
        key.push_str(c);
    }
    key
}

/// Try to get a cached response, invalidating it when a newer snapshot exists
/// than the one it was built from.
pub async fn get_cached(state: &AppState, cache_key: &str) -> Option<Arc<Vec<u8>>> {
    let cached = state.response_cache.get(cache_key).await?;

    if let Ok(current) = state.current_snapshot().await
        && let Some(cached_at) = cached.fetched_at
        && current.fetched_at > cached_at
    {
        tracing::debug!(cache_key = %cache_key, "cache_stale");
        state.response_cache.invalidate(cache_key).await;
        return None;
    }

    tracing::debug!(cache_key = %cache_key, "cache_hit");
    Some(cached.data.clone())
}

/// Store a response in cache with the snapshot time it was built from
pub async fn store_cached(
    state: &AppState,
    cache_key: String,
    data: Vec<u8>,
    fetched_at: Option<chrono::DateTime<chrono::Utc>>,
) {
    state
        .response_cache
        .insert(
            cache_key,
            CachedResponse {
                data: Arc::new(data),
                fetched_at,
            },
        )
        .await;
}

/// Build a cached JSON response with X-Cache header
pub fn json_response(data: Vec<u8>, cache_hit: bool) -> AppResult<Response> {
    let cache_header = if cache_hit { "HIT" } else { "MISS" };
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )
        .header("X-Cache", HeaderValue::from_static(cache_header))
        .body(axum::body::Body::from(data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Serialize and cache a response, then return it
pub async fn cache_and_respond<T: Serialize>(
    state: &AppState,
    cache_key: String,
    response: &T,
    fetched_at: Option<chrono::DateTime<chrono::Utc>>,
) -> AppResult<Response> {
    let json_bytes =
        serde_json::to_vec(response).map_err(|e| AppError::Internal(e.to_string()))?;

    store_cached(state, cache_key, json_bytes.clone(), fetched_at).await;

    json_response(json_bytes, false)
}
