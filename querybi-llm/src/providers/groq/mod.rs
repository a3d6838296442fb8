//! Groq provider for SQL synthesis
//!
//! Groq exposes an OpenAI-compatible chat-completions API; the client and
//! wire types follow that shape.

mod client;
mod synthesizer;
mod types;

pub use client::GroqClient;
pub use synthesizer::{GroqSqlSynthesizer, DEFAULT_MODEL};
