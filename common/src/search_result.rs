use serde::{Deserialize, Serialize};

use crate::search_query::{FilterSelection, SearchRequest};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultDocuments {
    pub query: SearchRequest,
    pub results: Vec<SearchResultDocumentItem>,
    pub total_hits: u64,
    pub took_ms: u64,
    pub display_filters: Vec<DisplayFilter>,
    pub applied_filters: String,
    pub facets: Vec<SearchResultFacets>,
    pub missing_images: Option<u64>,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResultDocumentItem {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub department: Option<String>,
    pub image: Option<String>,
    pub regular_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub score: Option<f64>,
    pub result_index_in_page: u64,
}

/// Human-readable description of one applied filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFilter {
    pub text: String,
}

impl DisplayFilter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFacets {
    pub facet_field: String,
    pub display_name: String,
    pub facet_values: Vec<SearchResultFacetItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFacetItem {
    pub display_string: String,
    pub count: u64,
    /// Selection that narrows the current search to this bucket.
    pub filter: FilterSelection,
    /// Applied filters of the current search, minus any selection on the same
    /// field, followed by `filter`. `None` for the bucket of products lacking
    /// the field.
    pub query_string: Option<String>,
}
