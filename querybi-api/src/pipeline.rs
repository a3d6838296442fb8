//! Pipeline Orchestrator
//!
//! Composes the synthesizer, safety gate, and executor behind the result
//! cache. Per request: CacheCheck → Synthesize → Sanitize → Gate →
//! Execute, with every terminal outcome (including errors) written back
//! to the cache under the verbatim question text.
//!
//! Error outcomes are cached like successes: a transient executor failure
//! replays from the cache until the entry's TTL expires. Synthesizer
//! diagnostics (`--`-prefixed comment SQL) and gate rejections short-
//! circuit before the executor is ever called.

use std::sync::Arc;

use querybi_core::{
    ensure_trailing_semicolon, strip_trailing_semicolons, QueryResponse, SafetyGate,
};
use querybi_llm::SqlSynthesizer;

use crate::cache::ResultCache;
use crate::executor::QueryExecutor;

/// The full question-to-rows pipeline.
pub struct QueryPipeline {
    synthesizer: Arc<dyn SqlSynthesizer>,
    executor: Arc<dyn QueryExecutor>,
    cache: ResultCache,
    gate: SafetyGate,
}

impl QueryPipeline {
    /// Create a pipeline with the standard cache TTL and denylist.
    pub fn new(synthesizer: Arc<dyn SqlSynthesizer>, executor: Arc<dyn QueryExecutor>) -> Self {
        Self::with_cache(synthesizer, executor, ResultCache::new())
    }

    /// Create a pipeline over a caller-supplied cache (used by tests to
    /// inject a short TTL).
    pub fn with_cache(
        synthesizer: Arc<dyn SqlSynthesizer>,
        executor: Arc<dyn QueryExecutor>,
        cache: ResultCache,
    ) -> Self {
        Self {
            synthesizer,
            executor,
            cache,
            gate: SafetyGate::new(),
        }
    }

    /// The result cache, for health reporting and invalidation routes.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Run the pipeline for one question.
    ///
    /// Always returns a well-formed response; failures ride in the
    /// `error` field rather than escaping as faults.
    pub async fn run(&self, question: &str) -> QueryResponse {
        if let Some(cached) = self.cache.get(question) {
            tracing::debug!(question, "cache hit");
            return cached;
        }

        let synthesized = self.synthesizer.synthesize(question).await;

        if synthesized.is_diagnostic() {
            // The synthesizer already folded its failure into comment SQL;
            // report it verbatim and never touch the executor.
            let error = synthesized
                .error
                .clone()
                .unwrap_or_else(|| "query synthesis failed".to_string());
            tracing::warn!(question, %error, "synthesis produced a diagnostic");
            return self.finish(question, QueryResponse::failure(synthesized.sql, error));
        }

        let bare = strip_trailing_semicolons(&synthesized.sql).to_string();
        if bare.is_empty() {
            return self.finish(
                question,
                QueryResponse::failure(synthesized.sql, "synthesizer returned an empty query"),
            );
        }

        let sql_query = ensure_trailing_semicolon(&bare);

        let allowed = match self.gate.validate(&bare) {
            Ok(allowed) => allowed,
            Err(reason) => {
                tracing::warn!(question, %reason, "query rejected by safety gate");
                return self.finish(question, QueryResponse::failure(sql_query, reason.to_string()));
            }
        };

        let response = match self.executor.execute(&allowed).await {
            Ok(rows) => {
                tracing::debug!(question, rows = rows.len(), "query executed");
                QueryResponse::success(sql_query, rows)
            }
            Err(err) => {
                tracing::warn!(question, %err, "query execution failed");
                QueryResponse::failure(sql_query, err.to_string())
            }
        };

        self.finish(question, response)
    }

    fn finish(&self, question: &str, response: QueryResponse) -> QueryResponse {
        self.cache.set(question, response.clone());
        response
    }
}

impl std::fmt::Debug for QueryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPipeline")
            .field("cache_entries", &self.cache.len())
            .finish()
    }
}
