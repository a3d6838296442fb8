//! Error types for QueryBI operations

use crate::gate::RejectionReason;
use thiserror::Error;

/// Query synthesis errors.
///
/// These never escape the synthesizer as hard faults: the provider folds
/// them into a comment-prefixed diagnostic `sql` string so the pipeline
/// always has something to report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Invalid API key for {provider}")]
    InvalidApiKey { provider: String },

    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("Could not extract a {{...}} block from the model reply")]
    ExtractionFailed,

    #[error("Model reply did not parse as a dictionary: {reason}")]
    ParseFailed { reason: String },

    #[error("Transport error: {reason}")]
    Transport { reason: String },
}

/// Warehouse execution errors.
///
/// Captured and surfaced inside the response `error` field; execution
/// failures are a pipeline outcome, not a transport fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Warehouse request failed with status {status}: {message}")]
    RequestFailed { status: i32, message: String },

    #[error("Invalid response from warehouse: {reason}")]
    InvalidResponse { reason: String },

    #[error("Transport error: {reason}")]
    Transport { reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all QueryBI errors.
#[derive(Debug, Clone, Error)]
pub enum QueryBiError {
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Unsafe query rejected: {0}")]
    UnsafeQuery(#[from] RejectionReason),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for QueryBI operations.
pub type QueryBiResult<T> = Result<T, QueryBiError>;

// =============================================================================
// TESTS
// =============================================================================
