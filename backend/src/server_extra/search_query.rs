//! `/search/query`: links and facet clicks arrive as GET, the search box posts a form.

use std::sync::Arc;

use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::search_query::SearchRequest;
use serde_json::json;

use crate::api::search::request_params::{RequestParams, search_request_from_form, search_request_from_query};
use crate::api::search::search_for_results;
use crate::error::SearchError;
use crate::server_extra::AppState;

pub async fn search_query_get(State(state): State<Arc<AppState>>, RawQuery(raw_query): RawQuery) -> Response {
    let params = RequestParams::parse(raw_query.as_deref().unwrap_or_default());
    run_search(&state, search_request_from_query(&params)).await
}

pub async fn search_query_post(State(state): State<Arc<AppState>>, body: String) -> Response {
    let params = RequestParams::parse(&body);
    run_search(&state, search_request_from_form(&params)).await
}

async fn run_search(state: &AppState, request: SearchRequest) -> Response {
    tracing::info!("Search: {:?} ({} filters)", request.query_string, request.filters.len());
    match search_for_results(&state.client, request).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => {
            tracing::error!("search_query: request failed: {:#?}", e);
            error_response(e)
        }
    }
}

pub fn error_status(error: &SearchError) -> StatusCode {
    match error {
        SearchError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        SearchError::BackendRejected { .. }
        | SearchError::InvalidResponse(_)
        | SearchError::UnexpectedResponse(_) => StatusCode::BAD_GATEWAY,
        SearchError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: SearchError) -> Response {
    (error_status(&error), Json(json!({"error": error.to_string()}))).into_response()
}
