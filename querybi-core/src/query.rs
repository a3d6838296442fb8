//! Query pipeline data types.
//!
//! Pure data shapes shared between the synthesizer, executor, and API
//! layers, plus the semicolon normalization helpers the orchestrator
//! applies around the safety gate.

use serde::{Deserialize, Serialize};

/// A single result row, as returned by the warehouse RPC.
pub type Row = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// SYNTHESIZED QUERY
// ============================================================================

/// Output of the query synthesizer.
///
/// `sql` is never absent: on failure it carries a comment-prefixed
/// diagnostic (`-- ERROR ...` or `-- Internal error ...`) instead of an
/// executable statement, so the pipeline always has something to report.
/// Immutable after creation; produced once per cache miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedQuery {
    pub sql: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SynthesizedQuery {
    /// A successfully synthesized query.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            error: None,
        }
    }

    /// A diagnostic placeholder for a failed synthesis.
    pub fn diagnostic(sql: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            error: Some(error.into()),
        }
    }

    /// Whether this result carries a diagnostic comment instead of
    /// executable SQL. Such results must never reach the executor.
    pub fn is_diagnostic(&self) -> bool {
        self.error.is_some() || self.sql.trim_start().starts_with("--")
    }
}

// ============================================================================
// QUERY RESPONSE
// ============================================================================

/// The externally visible pipeline outcome.
///
/// Identical in shape whether served fresh or from the cache. Invariant:
/// an executable `sql_query` ends with exactly one `;` and never begins a
/// mutating statement (the gate enforces this before execution; cache
/// reads do not re-validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub sql_query: String,
    pub raw_data: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn success(sql_query: impl Into<String>, raw_data: Vec<Row>) -> Self {
        Self {
            sql_query: sql_query.into(),
            raw_data,
            error: None,
        }
    }

    /// An outcome with an empty result set and an error description.
    pub fn failure(sql_query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            sql_query: sql_query.into(),
            raw_data: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ============================================================================
// SEMICOLON NORMALIZATION
// ============================================================================

/// Strip any trailing semicolons (and surrounding whitespace) from SQL
/// text before it is handed to the safety gate.
pub fn strip_trailing_semicolons(sql: &str) -> &str {
    let mut out = sql.trim();
    loop {
        let next = out.trim_end_matches(';').trim_end();
        if next.len() == out.len() {
            return next;
        }
        out = next;
    }
}

/// Normalize SQL text to end with exactly one `;`, whether the model
/// emitted zero, one, or several.
pub fn ensure_trailing_semicolon(sql: &str) -> String {
    format!("{};", strip_trailing_semicolons(sql))
}

// ============================================================================
// TESTS
// ============================================================================
