use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Feed '{feed}' timed out")]
    FetchTimeout { feed: &'static str },

    #[error("Feed '{feed}' returned HTTP {status}")]
    FetchHttp { feed: &'static str, status: u16 },

    #[error("Malformed collection: {0}")]
    MalformedCollection(String),

    #[error("Station id '{id}' claimed by multiple sources")]
    IdCollision { id: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::FetchTimeout { feed } => {
                tracing::error!(feed = %feed, "Feed fetch timed out");
                (StatusCode::GATEWAY_TIMEOUT, self.to_string())
            }
            Self::FetchHttp { feed, status } => {
                tracing::error!(feed = %feed, status = %status, "Feed fetch failed");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            Self::MalformedCollection(msg) => {
                tracing::error!("Malformed collection: {msg}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            Self::IdCollision { id } => {
                tracing::error!(id = %id, "Station id collision between sources");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
