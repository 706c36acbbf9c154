use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, middleware::metrics_middleware, movies, series};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Series
        .route("/series/search", post(series::search_series))
        .route("/series", get(series::list_series))
        .route(
            "/series/{title}",
            get(series::get_series).delete(series::remove_series),
        )
        // Movies
        .route("/movies/search", post(movies::search_movie))
        .route("/movies", get(movies::list_movies))
        .route(
            "/movies/{title}",
            get(movies::get_movie).delete(movies::remove_movie),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
