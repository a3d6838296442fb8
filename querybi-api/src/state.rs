//! Shared application state for Axum routers.

use std::sync::Arc;

use crate::pipeline::QueryPipeline;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(pipeline: Arc<QueryPipeline>) -> Self {
        Self {
            pipeline,
            start_time: std::time::Instant::now(),
        }
    }
}
