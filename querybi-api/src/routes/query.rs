//! Query pipeline endpoint.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

/// Request body for the dynamic query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    /// Natural-language description for the database query.
    pub description: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /dynamic-query/server-cache - Execute the LLM → SQL → data pipeline
///
/// Checks the in-memory cache for repeated requests (60s TTL) and returns
/// raw warehouse data in JSON format. Pipeline failures ride in the body's
/// `error` field with a success status; only malformed requests get an
/// error status.
pub async fn dynamic_query_server_cache(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.description.trim().is_empty() {
        return Err(ApiError::missing_field("description"));
    }

    let response = state.pipeline.run(&req.description).await;
    Ok(Json(response))
}
