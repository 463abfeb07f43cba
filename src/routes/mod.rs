pub mod cache;
pub mod collection;
pub mod freshness;
pub mod health;
mod rate_limit;
pub mod stations;
pub mod table;

use axum::{Router, extract::OriginalUri, routing::get};
use std::sync::Arc;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};

use rate_limit::FallbackIpKeyExtractor;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::AppError;

/// Maximum trailing window accepted by the data routes (30 days)
pub const MAX_WINDOW_HOURS: i64 = 720;

async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Unknown API path: {}", uri.path()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        collection::get_collection,
        table::get_table,
        stations::list_stations,
        freshness::get_freshness,
    ),
    components(
        schemas(
            collection::CollectionResponse,
            collection::StationSeries,
            collection::SeriesData,
            table::TableResponse,
            crate::core::bucket::HourlyTable,
            crate::core::bucket::TableRow,
            crate::core::bucket::ColumnInfo,
            crate::core::freshness::Freshness,
            crate::model::Provenance,
            stations::StationRow,
            freshness::FreshnessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "observations", description = "Windowed and bucketed observation data"),
        (name = "stations", description = "Station summaries and snapshot freshness"),
    ),
    info(
        title = "Marine Obs API",
        description = "Normalized marine weather observation API",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
    } else {
        tracing::info!(
            metadata_rate = %format!("{}/s burst {}", config.rate_limit_metadata_per_second, config.rate_limit_metadata_burst),
            data_rate = %format!("{}/s burst {}", config.rate_limit_data_per_second, config.rate_limit_data_burst),
            "Rate limiting configured"
        );
    }

    // Base routes without rate limiting
    let metadata_routes_base = Router::new()
        .route("/stations", get(stations::list_stations))
        .route("/freshness", get(freshness::get_freshness));

    let data_routes_base = Router::new()
        .route("/collection", get(collection::get_collection))
        .route("/table", get(table::get_table));

    // Combine API routes, conditionally applying rate limiting
    let api_routes = if config.disable_rate_limiting {
        Router::new()
            .merge(metadata_routes_base)
            .merge(data_routes_base)
    } else {
        let metadata_limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_metadata_per_second)
            .burst_size(config.rate_limit_metadata_burst)
            .finish()
            .expect("Failed to create metadata rate limiter");

        let data_limiter = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(config.rate_limit_data_per_second)
            .burst_size(config.rate_limit_data_burst)
            .finish()
            .expect("Failed to create data rate limiter");

        Router::new()
            .merge(metadata_routes_base.layer(GovernorLayer {
                config: Arc::new(metadata_limiter),
            }))
            .merge(data_routes_base.layer(GovernorLayer {
                config: Arc::new(data_limiter),
            }))
    }
    .fallback(api_not_found)
    .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Combine all routes
    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
