//! Search endpoint for result lists.

use common::search_query::SearchRequest;
use common::search_result::{SearchResultDocumentItem, SearchResultDocuments};
use serde_json::Value;

use crate::api::search::filters::CompiledFilters;
use crate::api::search::search_dsl::compile_search;
use crate::api::search::search_facets::facets_from_aggregations;
use crate::db_utils::opensearch_utils::{OpenSearchClient, RawSearchResult, RawSearchResultHit};
use crate::error::Result;

pub async fn search_for_results(client: &OpenSearchClient, request: SearchRequest) -> Result<SearchResultDocuments> {
    let (query, filters) = compile_search(&request);
    let response = client.search::<Value>(&query).await?;
    shape_search_response(request, filters, response)
}

/// Builds the page model from a raw backend response.
pub fn shape_search_response(
    request: SearchRequest,
    filters: CompiledFilters,
    response: RawSearchResult<Value>,
) -> Result<SearchResultDocuments> {
    let (facets, missing_images) = match &response.aggregations {
        Some(aggregations) => facets_from_aggregations(aggregations, &filters.applied_filters)?,
        None => (Vec::new(), None),
    };

    let total_hits = response.hits.total.as_ref().map(|t| t.value).unwrap_or(response.hits.hits.len() as u64);
    let results = response
        .hits
        .hits
        .iter()
        .enumerate()
        .map(|(index, hit)| document_item(hit, index as u64))
        .collect::<Vec<_>>();

    Ok(SearchResultDocuments {
        query: request,
        results,
        total_hits,
        took_ms: response.took,
        display_filters: filters.display_filters,
        applied_filters: filters.applied_filters.to_query_string(),
        facets,
        missing_images,
    })
}

fn document_item(hit: &RawSearchResultHit<Value>, result_index_in_page: u64) -> SearchResultDocumentItem {
    let source = &hit._source;
    SearchResultDocumentItem {
        sku: source_string(source, "sku").or_else(|| Some(hit._id.clone())),
        name: source_string(source, "name"),
        short_description: source_string(source, "shortDescription"),
        department: source_string(source, "department"),
        image: source_string(source, "image"),
        regular_price: source_number(source, "regularPrice"),
        sale_price: source_number(source, "salePrice"),
        score: hit._score,
        result_index_in_page,
    }
}

/// Catalog fields may be indexed as single values or as lists; lists yield
/// their first element.
fn source_field<'a>(source: &'a Value, field: &str) -> Option<&'a Value> {
    match source.get(field)? {
        Value::Array(values) => values.first(),
        value => Some(value),
    }
}

fn source_string(source: &Value, field: &str) -> Option<String> {
    match source_field(source, field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn source_number(source: &Value, field: &str) -> Option<f64> {
    match source_field(source, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
