use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::feeds::FeedClient;
use crate::model::SnapshotSet;

/// Cached response with the snapshot time it was built from, for freshness
/// checking against the current snapshot.
#[derive(Clone)]
pub struct CachedResponse {
    pub data: Arc<Vec<u8>>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Cache for API responses. Key is request params, value is serialized
/// response + metadata. Weighted by byte size to enforce a memory limit.
pub type ResponseCache = Cache<String, CachedResponse>;

/// Outcome of the most recent refresh cycle. A failed refresh never clears
/// the last good snapshot; it only raises the warning here.
#[derive(Debug, Clone, Default)]
pub struct RefreshStatus {
    pub failed: bool,
    pub last_error: Option<String>,
    pub last_success: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed_client: Arc<FeedClient>,
    /// Last successfully loaded snapshot set. Immutable once published; a new
    /// refresh cycle swaps in a whole new `Arc`.
    pub snapshot: Arc<RwLock<Option<Arc<SnapshotSet>>>>,
    pub refresh_status: Arc<RwLock<RefreshStatus>>,
    pub response_cache: ResponseCache,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, feed_client: FeedClient) -> Self {
        // Cache weighted by byte size, not entry count
        let cache: ResponseCache = Cache::builder()
            .weigher(|_key: &String, value: &CachedResponse| -> u32 {
                value.data.len().try_into().unwrap_or(u32::MAX)
            })
            .max_capacity(config.cache_max_bytes)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();

        Self {
            config: Arc::new(config),
            feed_client: Arc::new(feed_client),
            snapshot: Arc::new(RwLock::new(None)),
            refresh_status: Arc::new(RwLock::new(RefreshStatus::default())),
            response_cache: cache,
        }
    }

    /// The last good snapshot set, or `ServiceUnavailable` before the first
    /// successful refresh cycle.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ServiceUnavailable` when no snapshot is loaded yet.
    pub async fn current_snapshot(&self) -> AppResult<Arc<SnapshotSet>> {
        self.snapshot.read().await.clone().ok_or_else(|| {
            AppError::ServiceUnavailable("No observation snapshot loaded yet".to_string())
        })
    }

    /// Publish a freshly built snapshot set and clear any refresh warning.
    pub async fn publish_snapshot(&self, set: SnapshotSet) {
        let fetched_at = set.fetched_at;
        *self.snapshot.write().await = Some(Arc::new(set));
        let mut status = self.refresh_status.write().await;
        status.failed = false;
        status.last_error = None;
        status.last_success = Some(fetched_at);
    }

    /// Latch a refresh failure without touching the last good snapshot.
    pub async fn record_refresh_failure(&self, error: String) {
        let mut status = self.refresh_status.write().await;
        status.failed = true;
        status.last_error = Some(error);
    }
}
