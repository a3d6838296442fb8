//! Synthesizer provider implementations
//!
//! Concrete implementations of the SqlSynthesizer trait for hosted LLM
//! services.

pub mod groq;

pub use groq::{GroqClient, GroqSqlSynthesizer};

use querybi_core::SynthesisError;

pub(crate) fn request_failed(
    provider: &str,
    status: i32,
    message: impl Into<String>,
) -> SynthesisError {
    SynthesisError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
}

pub(crate) fn invalid_api_key(provider: &str) -> SynthesisError {
    SynthesisError::InvalidApiKey {
        provider: provider.to_string(),
    }
}

pub(crate) fn rate_limited(provider: &str) -> SynthesisError {
    SynthesisError::RateLimited {
        provider: provider.to_string(),
    }
}

pub(crate) fn transport(reason: impl Into<String>) -> SynthesisError {
    SynthesisError::Transport {
        reason: reason.into(),
    }
}
