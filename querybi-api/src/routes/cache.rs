//! Cache invalidation endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateAllResponse {
    pub cache_cleared: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateKeyResponse {
    pub invalidated: bool,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /cache/invalidate - Clear all cached entries
pub async fn invalidate_all(State(state): State<AppState>) -> impl IntoResponse {
    state.pipeline.cache().invalidate(None);
    tracing::info!("cache cleared");
    Json(InvalidateAllResponse {
        cache_cleared: true,
    })
}

/// POST /cache/invalidate/{description} - Delete one cache entry
///
/// The path segment is the verbatim question text (percent-encoded by the
/// caller). A key with no entry is a 404.
pub async fn invalidate_one(
    State(state): State<AppState>,
    Path(description): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if !state.pipeline.cache().invalidate(Some(&description)) {
        return Err(ApiError::cache_entry_not_found(&description));
    }

    tracing::info!(key = %description, "cache entry invalidated");
    Ok(Json(InvalidateKeyResponse { invalidated: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_responses_serialize() {
        let json = serde_json::to_string(&InvalidateAllResponse {
            cache_cleared: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"cache_cleared":true}"#);

        let json = serde_json::to_string(&InvalidateKeyResponse { invalidated: true }).unwrap();
        assert_eq!(json, r#"{"invalidated":true}"#);
    }
}
