//! Shared handler types: the error response and the health payload

use crate::gateway::UpstreamError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-dependency connection state in the health response
pub fn connection_state(ok: bool) -> String {
    if ok {
        "connected".to_string()
    } else {
        "disconnected".to_string()
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: BTreeMap<String, String>,
}

impl HealthResponse {
    pub fn new(status: &str, services: impl IntoIterator<Item = (&'static str, bool)>) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: services
                .into_iter()
                .map(|(name, ok)| (name.to_string(), connection_state(ok)))
                .collect(),
        }
    }
}

/// Health of a service with a single backing database
pub fn single_store_health(name: &'static str, ok: bool) -> (StatusCode, Json<HealthResponse>) {
    if ok {
        (StatusCode::OK, Json(HealthResponse::new("ok", [(name, ok)])))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("unhealthy", [(name, ok)])),
        )
    }
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// 404 with `{message}`
    NotFound(String),
    /// 404 with an empty paginated envelope, for searches with no hits
    NoResults(String),
    BadRequest(String),
    Internal(anyhow::Error),
    /// A backend service failed (gateway only)
    Upstream(UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "message": msg })),
            AppError::NoResults(msg) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "data": [], "hasSearched": true, "error": msg }),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "message": msg }))
            }
            AppError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "message": "Internal server error",
                        "error": format!("{:#}", e),
                    }),
                )
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream call failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    serde_json::json!({
                        "message": format!("The {} could not be reached", e.service()),
                        "error": e.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err)
    }
}
