//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(handlers::api_search))
        // Click-through for result links
        .route("/url", get(handlers::goto))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
