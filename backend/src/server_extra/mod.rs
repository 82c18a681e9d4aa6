//! HTTP routes served next to the search API.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::json;

use crate::db_utils::opensearch_utils::OpenSearchClient;

pub mod search_query;

/// Shared by every request; holds the one backend client of the process.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: OpenSearchClient,
}

impl AppState {
    pub fn new(client: OpenSearchClient) -> Self {
        Self { client }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search/query", get(search_query::search_query_get).post(search_query::search_query_post))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
