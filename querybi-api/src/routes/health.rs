//! Liveness and health endpoints.
//!
//! No authentication required.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "querybi";

// ============================================================================
// TYPES
// ============================================================================

/// Root endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub service: String,
}

/// Health check response, including cache occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub cache_entries: usize,
    pub cache_ttl_seconds: u64,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET / - Basic service status
pub async fn root() -> impl IntoResponse {
    Json(ServiceStatus {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /health - Health info including cache status
///
/// `cache_entries` counts resident entries, including expired ones that
/// no read has swept yet.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let cache = state.pipeline.cache();
    Json(HealthResponse {
        status: "healthy".to_string(),
        cache_entries: cache.len(),
        cache_ttl_seconds: cache.ttl_seconds(),
    })
}
