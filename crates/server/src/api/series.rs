//! Series catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shelf_core::SeriesCatalog;

use super::handlers::{
    error, prepare_search, ApiError, CatalogListResponse, SearchRequest, SuccessResponse,
};
use crate::state::AppState;

/// POST /api/v1/series/search
///
/// Search for a series and store the refreshed catalog.
pub async fn search_series(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SeriesCatalog>, ApiError> {
    let (title, transport) = prepare_search(&state, &request)?;

    let catalog = state
        .library()
        .search_series(&title, transport.as_ref(), state.token())
        .await;

    Ok(Json(catalog))
}

/// GET /api/v1/series
///
/// List stored series catalogs, most recently updated first.
pub async fn list_series(State(state): State<Arc<AppState>>) -> Json<CatalogListResponse> {
    Json(state.library().list_series().into())
}

/// GET /api/v1/series/{title}
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<SeriesCatalog>, ApiError> {
    state
        .library()
        .load_series(&title)
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("Series not found: {}", title)))
}

/// DELETE /api/v1/series/{title}
pub async fn remove_series(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if state.library().remove_series(&title) {
        Ok(Json(SuccessResponse {
            message: format!("Removed series {}", title),
        }))
    } else {
        Err(error(StatusCode::NOT_FOUND, format!("Series not found: {}", title)))
    }
}
