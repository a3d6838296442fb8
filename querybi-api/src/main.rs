//! QueryBI API Server Entry Point
//!
//! Bootstraps configuration, constructs the synthesizer and warehouse
//! executor, and starts the Axum HTTP server. Missing LLM or warehouse
//! credentials abort startup.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use querybi_api::{
    create_api_router, ApiConfig, ApiError, ApiResult, AppState, LlmConfig, QueryPipeline,
    SupabaseExecutor, WarehouseConfig,
};
use querybi_llm::GroqSqlSynthesizer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let llm_config = LlmConfig::from_env()?;
    let warehouse_config = WarehouseConfig::from_env()?;
    let api_config = ApiConfig::from_env();

    let synthesizer = Arc::new(GroqSqlSynthesizer::new(&llm_config.api_key, &llm_config.model));
    let executor = Arc::new(SupabaseExecutor::new(&warehouse_config));
    let pipeline = Arc::new(QueryPipeline::new(synthesizer, executor));

    let state = AppState::new(Arc::clone(&pipeline));
    let app: Router = create_api_router(state, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, model = %llm_config.model, "Starting QueryBI API server; in-memory cache initialized");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    // Memory-only cache: cleared explicitly on the way out.
    pipeline.cache().invalidate(None);
    tracing::info!("QueryBI shutting down; cache cleared");
    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("QUERYBI_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("QUERYBI_PORT").ok())
        .unwrap_or_else(|| "8000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
