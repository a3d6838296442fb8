//! REST route handlers and router assembly.

pub mod cache;
pub mod health;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::state::AppState;

/// Assemble the API router with CORS and request tracing.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/dynamic-query/server-cache",
            post(query::dynamic_query_server_cache),
        )
        .route("/cache/invalidate", post(cache::invalidate_all))
        .route("/cache/invalidate/:description", post(cache::invalidate_one))
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
        .with_state(state)
}
