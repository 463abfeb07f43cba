use std::time::Duration;
use tokio::time::interval;

use crate::common::AppState;
use crate::sync::worker;

/// Run the observation refresh task on a schedule.
///
/// The first cycle runs immediately so the API can serve data as soon as the
/// feeds respond. A failed cycle is retried a bounded number of times; if all
/// retries fail, the previously published snapshot stays visible and the
/// failure is latched for the warning indicator.
pub async fn run_refresh(state: AppState) {
    let interval_secs = state.config.refresh_interval_seconds;
    let retry_delay_secs = state.config.refresh_retry_delay_seconds;
    let max_retries = state.config.refresh_retry_max;

    tracing::info!(interval_secs, "Starting observation refresh scheduler");

    let mut ticker = interval(Duration::from_secs(interval_secs));

    // Run initial refresh immediately
    ticker.tick().await;

    loop {
        tracing::debug!("Running observation refresh...");

        let mut retries = 0;
        loop {
            match worker::load_snapshot_set(&state.feed_client).await {
                Ok(set) => {
                    state.publish_snapshot(set).await;
                    tracing::debug!("Observation refresh completed successfully");
                    break;
                }
                Err(e) => {
                    retries += 1;
                    if retries <= max_retries {
                        tracing::error!(
                            error = %e,
                            retry = retries,
                            max_retries,
                            "Observation refresh failed, retrying"
                        );
                        tokio::time::sleep(Duration::from_secs(retry_delay_secs)).await;
                    } else {
                        tracing::error!(
                            error = %e,
                            max_retries,
                            "Observation refresh failed after max retries, keeping last snapshot"
                        );
                        state.record_refresh_failure(e.to_string()).await;
                        break;
                    }
                }
            }
        }

        // Wait for next tick
        ticker.tick().await;
    }
}
