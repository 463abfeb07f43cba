use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::feeds::models::{BuoyLatestDoc, BuoySeriesDoc, LightstationDoc, WindStationsDoc};

pub struct FeedClient {
    http_client: Client,
    base_url: String,
}

impl FeedClient {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.feed_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: config.feeds_base_url.clone(),
        }
    }

    /// Fetch and parse one feed document.
    ///
    /// A cache-busting `t` parameter keeps intermediate caches from serving
    /// a previous snapshot of the same stable path.
    async fn get_document<T: DeserializeOwned>(
        &self,
        feed: &'static str,
        path: &str,
    ) -> AppResult<T> {
        let url = format!(
            "{}/{}?t={}",
            self.base_url,
            path,
            Utc::now().timestamp_millis()
        );

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::FetchTimeout { feed }
            } else {
                AppError::Internal(format!("Feed '{feed}' request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchHttp {
                feed,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AppError::FetchTimeout { feed }
            } else {
                AppError::Internal(format!("Feed '{feed}' body read failed: {e}"))
            }
        })?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                feed,
                error = %e,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse feed document"
            );
            AppError::MalformedCollection(format!("feed '{feed}': {e}"))
        })
    }

    /// Combined land wind station observations.
    ///
    /// # Errors
    ///
    /// Returns `FetchTimeout`, `FetchHttp`, or `MalformedCollection`.
    pub async fn get_wind_stations(&self) -> AppResult<WindStationsDoc> {
        self.get_document("wind_stations", "wind/observations.json")
            .await
    }

    /// Latest buoy snapshot.
    ///
    /// # Errors
    ///
    /// Returns `FetchTimeout`, `FetchHttp`, or `MalformedCollection`.
    pub async fn get_buoys_latest(&self) -> AppResult<BuoyLatestDoc> {
        self.get_document("buoys_latest", "buoys/latest.json").await
    }

    /// Multi-hour buoy timeseries.
    ///
    /// # Errors
    ///
    /// Returns `FetchTimeout`, `FetchHttp`, or `MalformedCollection`.
    pub async fn get_buoys_timeseries(&self) -> AppResult<BuoySeriesDoc> {
        self.get_document("buoys_timeseries", "buoys/timeseries.json")
            .await
    }

    /// Lightstation timeseries.
    ///
    /// # Errors
    ///
    /// Returns `FetchTimeout`, `FetchHttp`, or `MalformedCollection`.
    pub async fn get_lightstations(&self) -> AppResult<LightstationDoc> {
        self.get_document("lightstations", "lightstations/timeseries.json")
            .await
    }
}
