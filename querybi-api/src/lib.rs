//! QUERYBI API - HTTP service layer
//!
//! This crate wires the pipeline together: Axum routes on the outside,
//! the result cache and safety gate in the middle, and the synthesizer
//! and warehouse executor underneath.

pub mod cache;
pub mod config;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use cache::{ResultCache, CACHE_TTL_SECONDS};
pub use config::{ApiConfig, LlmConfig, WarehouseConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use executor::{QueryExecutor, SupabaseExecutor};
pub use pipeline::QueryPipeline;
pub use routes::create_api_router;
pub use state::AppState;
