//! API Configuration Module
//!
//! Configuration is loaded from environment variables. CORS and bind
//! settings fall back to development defaults; the LLM and warehouse
//! credentials are required and their absence is a startup-time fatal
//! condition.

use querybi_core::ConfigError;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Default Supabase RPC function used to run validated queries.
pub const DEFAULT_RPC_FUNCTION: &str = "execute_llm_select_query";

/// Default model for SQL synthesis.
pub const DEFAULT_MODEL: &str = querybi_llm::providers::groq::DEFAULT_MODEL;

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// HTTP-surface configuration (CORS).
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `QUERYBI_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("QUERYBI_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        Self { cors_origins }
    }

    /// Build the CORS layer for the router.
    pub fn cors_layer(&self) -> CorsLayer {
        if self.cors_origins.is_empty() {
            // Dev mode: allow all
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<axum::http::HeaderValue> = self
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

// ============================================================================
// LLM CONFIGURATION
// ============================================================================

/// Synthesizer credentials and model selection.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
}

impl LlmConfig {
    /// Create LlmConfig from environment variables.
    ///
    /// Environment variables:
    /// - `GROQ_API_KEY`: Groq API key (required)
    /// - `GROQ_MODEL`: Model name (default: llama-3.3-70b-versatile)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = require_env("GROQ_API_KEY")?;
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self { api_key, model })
    }
}

// ============================================================================
// WAREHOUSE CONFIGURATION
// ============================================================================

/// Supabase project credentials and RPC routing.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    pub project_url: String,
    pub api_key: String,
    pub rpc_function: String,
}

impl WarehouseConfig {
    /// Create WarehouseConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SUPABASE_URL`: Project URL (required)
    /// - `SUPABASE_KEY`: Anon/service API key (required)
    /// - `SUPABASE_RPC_FUNCTION`: RPC function name (default: execute_llm_select_query)
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_url = require_env("SUPABASE_URL")?;
        let api_key = require_env("SUPABASE_KEY")?;
        let rpc_function = std::env::var("SUPABASE_RPC_FUNCTION")
            .unwrap_or_else(|_| DEFAULT_RPC_FUNCTION.to_string());

        Ok(Self {
            project_url,
            api_key,
            rpc_function,
        })
    }
}

fn require_env(field: &str) -> Result<String, ConfigError> {
    match std::env::var(field) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingRequired {
            field: field.to_string(),
        }),
    }
}
