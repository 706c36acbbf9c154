use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use shelf_core::{CatalogEntry, SanitizedConfig, SearchTransport};

use crate::metrics::{collect_dynamic_metrics, encode_metrics};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub search_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Body of the search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogListResponse {
    pub entries: Vec<CatalogEntry>,
    pub total: usize,
}

impl From<Vec<CatalogEntry>> for CatalogListResponse {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self {
            total: entries.len(),
            entries,
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Validate a search request and pick the configured transport.
pub fn prepare_search(
    state: &AppState,
    request: &SearchRequest,
) -> Result<(String, Arc<dyn SearchTransport>), ApiError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "title must not be empty"));
    }

    let transport = state.transport().cloned().ok_or_else(|| {
        error(
            StatusCode::SERVICE_UNAVAILABLE,
            "No search backend configured",
        )
    })?;

    Ok((title.to_string(), transport))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        search_configured: state.transport().is_some(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /api/v1/metrics
///
/// Prometheus text exposition.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    collect_dynamic_metrics(&state);
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        encode_metrics(),
    )
}
