//! Query Executor
//!
//! Runs gate-approved SQL against the warehouse. The production
//! implementation calls a Supabase RPC function over the PostgREST HTTP
//! surface; the trait seam exists so the pipeline can be exercised with
//! in-process fakes.

use async_trait::async_trait;
use querybi_core::{AllowedSql, ExecutionError, Row};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::WarehouseConfig;

// ============================================================================
// EXECUTOR TRAIT
// ============================================================================

/// Trait for warehouse executors.
/// Implementations must be thread-safe (Send + Sync).
///
/// Only `AllowedSql` is accepted, so execution cannot be reached without
/// passing the safety gate first.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute validated SQL and return the result rows.
    ///
    /// Every failure (bad syntax, missing table, connectivity) must be
    /// captured as a structured `ExecutionError`, never an unhandled
    /// fault that crashes the request.
    async fn execute(&self, sql: &AllowedSql) -> Result<Vec<Row>, ExecutionError>;
}

// ============================================================================
// SUPABASE EXECUTOR
// ============================================================================

/// PostgREST error body shape.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

/// Executor backed by a Supabase RPC function.
///
/// The RPC function receives the query text as its `query` argument and
/// returns the result set as a JSON array of row objects. The function's
/// database role limits what it can run; the safety gate still runs
/// before this executor for every request.
pub struct SupabaseExecutor {
    client: Client,
    project_url: String,
    api_key: String,
    rpc_function: String,
}

impl SupabaseExecutor {
    pub fn new(config: &WarehouseConfig) -> Self {
        Self {
            client: Client::new(),
            project_url: config.project_url.clone(),
            api_key: config.api_key.clone(),
            rpc_function: config.rpc_function.clone(),
        }
    }

    fn rpc_url(&self) -> String {
        format!(
            "{}/rest/v1/rpc/{}",
            self.project_url.trim_end_matches('/'),
            self.rpc_function
        )
    }
}

#[async_trait]
impl QueryExecutor for SupabaseExecutor {
    async fn execute(&self, sql: &AllowedSql) -> Result<Vec<Row>, ExecutionError> {
        let response = self
            .client
            .post(self.rpc_url())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({ "query": sql.as_str() }))
            .send()
            .await
            .map_err(|e| ExecutionError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();

        if status.is_success() {
            let value: serde_json::Value =
                response
                    .json()
                    .await
                    .map_err(|e| ExecutionError::InvalidResponse {
                        reason: format!("Failed to parse response: {}", e),
                    })?;
            rows_from_value(value)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let message = serde_json::from_str::<PostgrestError>(&error_text)
                .map(|e| e.message)
                .unwrap_or(error_text);

            Err(match status {
                // PostgREST reports SQL-level failures as client errors.
                StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::CONFLICT => {
                    ExecutionError::QueryFailed { message }
                }
                _ => ExecutionError::RequestFailed {
                    status: status.as_u16() as i32,
                    message,
                },
            })
        }
    }
}

impl std::fmt::Debug for SupabaseExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseExecutor")
            .field("project_url", &self.project_url)
            .field("rpc_function", &self.rpc_function)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Interpret the RPC reply as a sequence of row objects.
///
/// A `null` reply (an RPC returning zero rows) maps to an empty result
/// set; anything that is not an array of objects is a malformed reply.
fn rows_from_value(value: serde_json::Value) -> Result<Vec<Row>, ExecutionError> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Object(map) => Ok(map),
                other => Err(ExecutionError::InvalidResponse {
                    reason: format!("expected a row object, got: {}", other),
                }),
            })
            .collect(),
        serde_json::Value::Null => Ok(Vec::new()),
        other => Err(ExecutionError::InvalidResponse {
            reason: format!("expected a row array, got: {}", other),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
