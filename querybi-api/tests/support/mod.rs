//! Shared test doubles for the pipeline and HTTP suites.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use querybi_api::executor::QueryExecutor;
use querybi_core::{AllowedSql, ExecutionError, Row, SynthesizedQuery};
use querybi_llm::SqlSynthesizer;

/// Synthesizer double that returns a fixed reply and counts calls.
pub struct ScriptedSynthesizer {
    reply: SynthesizedQuery,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSynthesizer {
    pub fn returning_sql(sql: &str) -> Self {
        Self::returning(SynthesizedQuery::new(sql))
    }

    pub fn returning(reply: SynthesizedQuery) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the call counter, kept by the test after the mock moves
    /// into the pipeline.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl SqlSynthesizer for ScriptedSynthesizer {
    async fn synthesize(&self, _question: &str) -> SynthesizedQuery {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Executor double with a fixed outcome, call counter, and SQL capture.
pub struct ScriptedExecutor {
    outcome: Result<Vec<Row>, ExecutionError>,
    calls: Arc<AtomicUsize>,
    seen_sql: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn returning_rows(rows: Vec<Row>) -> Self {
        Self::with_outcome(Ok(rows))
    }

    pub fn failing(err: ExecutionError) -> Self {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<Vec<Row>, ExecutionError>) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            seen_sql: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Every SQL string this executor was asked to run, in order.
    pub fn seen_sql(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.seen_sql)
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, sql: &AllowedSql) -> Result<Vec<Row>, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_sql
            .lock()
            .expect("seen_sql lock")
            .push(sql.as_str().to_string());
        self.outcome.clone()
    }
}

/// Build a result row from key/value pairs.
pub fn row(pairs: &[(&str, serde_json::Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
