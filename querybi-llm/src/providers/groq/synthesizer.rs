//! Groq SQL synthesizer implementation

use super::client::GroqClient;
use super::types::{CompletionRequest, CompletionResponse, Message};
use crate::extract::parse_synthesized;
use crate::prompt::build_sql_prompt;
use crate::SqlSynthesizer;
use async_trait::async_trait;
use querybi_core::{SynthesisError, SynthesizedQuery};

/// Default model for SQL synthesis.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Completion budget for a single synthesized query.
const MAX_COMPLETION_TOKENS: i32 = 4000;

/// Groq-backed SQL synthesizer.
pub struct GroqSqlSynthesizer {
    client: GroqClient,
    model: String,
}

impl GroqSqlSynthesizer {
    /// Create a new Groq synthesizer.
    ///
    /// # Arguments
    /// * `api_key` - Groq API key
    /// * `model` - Model name (e.g., "llama-3.3-70b-versatile")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: GroqClient::new(api_key, 30),
            model: model.into(),
        }
    }

    /// Create a synthesizer with the default model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_MODEL)
    }

    /// Create a synthesizer over a pre-configured client.
    pub fn with_client(client: GroqClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Fold a raw model reply into a SynthesizedQuery.
    ///
    /// Extraction and parse failures become `-- ERROR` diagnostics; the
    /// reply is echoed back (comment-prefixed) when no dictionary could be
    /// found, so the caller can see what the model actually said.
    fn fold_reply(reply: &str) -> SynthesizedQuery {
        match parse_synthesized(reply) {
            Ok(query) => query,
            Err(SynthesisError::ExtractionFailed) => SynthesizedQuery::new(format!(
                "-- ERROR: Could not extract dict from LLM:\n-- {}",
                reply
            )),
            Err(err) => {
                SynthesizedQuery::diagnostic(format!("-- ERROR: {}", err), err.to_string())
            }
        }
    }
}

#[async_trait]
impl SqlSynthesizer for GroqSqlSynthesizer {
    async fn synthesize(&self, question: &str) -> SynthesizedQuery {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: build_sql_prompt(question),
            }],
            max_tokens: Some(MAX_COMPLETION_TOKENS),
            temperature: Some(0.0), // Deterministic SQL generation
        };

        let response: Result<CompletionResponse, SynthesisError> =
            self.client.request("chat/completions", request).await;

        match response {
            Ok(completion) => {
                let reply = completion
                    .choices
                    .first()
                    .map(|choice| choice.message.content.trim().to_string())
                    .unwrap_or_default();
                Self::fold_reply(&reply)
            }
            Err(err) => {
                SynthesizedQuery::diagnostic(format!("-- Internal error: {}", err), err.to_string())
            }
        }
    }
}

impl std::fmt::Debug for GroqSqlSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqSqlSynthesizer")
            .field("model", &self.model)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
