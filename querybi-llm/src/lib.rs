//! QUERYBI LLM - Query synthesizer layer
//!
//! Provider-agnostic trait for turning a natural-language question into a
//! SQL query, plus the Groq (OpenAI-compatible) provider implementation.
//! Synthesis is infallible by contract: every failure mode is folded into
//! a comment-prefixed diagnostic `sql` string so the pipeline always has
//! something to report.

pub mod extract;
pub mod prompt;
pub mod providers;

use async_trait::async_trait;
use querybi_core::SynthesizedQuery;

pub use providers::groq::{GroqClient, GroqSqlSynthesizer};

/// Trait for SQL synthesizers.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Example
/// ```ignore
/// struct CannedSynthesizer;
///
/// #[async_trait]
/// impl SqlSynthesizer for CannedSynthesizer {
///     async fn synthesize(&self, _question: &str) -> SynthesizedQuery {
///         SynthesizedQuery::new("SELECT 1;")
///     }
/// }
/// ```
#[async_trait]
pub trait SqlSynthesizer: Send + Sync {
    /// Synthesize a SQL query for a natural-language question.
    ///
    /// Never fails outright: transport, extraction, and parse failures are
    /// embedded in the returned `sql` text as a `--`-prefixed diagnostic
    /// (with `error` set where the provider saw a hard fault).
    async fn synthesize(&self, question: &str) -> SynthesizedQuery;
}
