//! Movie catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shelf_core::MovieCatalog;

use super::handlers::{
    error, prepare_search, ApiError, CatalogListResponse, SearchRequest, SuccessResponse,
};
use crate::state::AppState;

/// POST /api/v1/movies/search
///
/// Search for a movie and store the refreshed catalog.
pub async fn search_movie(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<MovieCatalog>, ApiError> {
    let (title, transport) = prepare_search(&state, &request)?;

    let catalog = state
        .library()
        .search_movie(&title, transport.as_ref(), state.token())
        .await;

    Ok(Json(catalog))
}

/// GET /api/v1/movies
pub async fn list_movies(State(state): State<Arc<AppState>>) -> Json<CatalogListResponse> {
    Json(state.library().list_movies().into())
}

/// GET /api/v1/movies/{title}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<MovieCatalog>, ApiError> {
    state
        .library()
        .load_movie(&title)
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("Movie not found: {}", title)))
}

/// DELETE /api/v1/movies/{title}
pub async fn remove_movie(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if state.library().remove_movie(&title) {
        Ok(Json(SuccessResponse {
            message: format!("Removed movie {}", title),
        }))
    } else {
        Err(error(StatusCode::NOT_FOUND, format!("Movie not found: {}", title)))
    }
}
