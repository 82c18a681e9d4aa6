//! Facet shaping from the aggregation buckets of a search response.

use std::collections::BTreeMap;

use common::search_query::FilterSelection;
use common::search_result::{SearchResultFacetItem, SearchResultFacets};

use crate::api::search::applied_filters::AppliedFilters;
use crate::api::search::search_dsl::{
    DEPARTMENT_AGGREGATION, DEPARTMENT_FIELD, DEPARTMENT_MISSING, MISSING_IMAGES_AGGREGATION, PRICE_AGGREGATION, PRICE_FIELD,
};
use crate::db_utils::opensearch_utils::{RawSearchResultAggregation, RawSearchResultAggregationBucket};
use crate::error::{Result, SearchError};

pub const PRICE_DISPLAY_NAME: &str = "Price";
pub const DEPARTMENT_DISPLAY_NAME: &str = "Department";

/// Price and department facets plus the missing-image count.
///
/// Absent aggregations produce empty facets rather than errors.
pub fn facets_from_aggregations(
    aggregations: &BTreeMap<String, RawSearchResultAggregation>,
    applied_filters: &AppliedFilters,
) -> Result<(Vec<SearchResultFacets>, Option<u64>)> {
    let empty = RawSearchResultAggregation::default();

    let price = aggregations.get(PRICE_AGGREGATION).unwrap_or(&empty);
    let mut price_facet = SearchResultFacets {
        facet_field: PRICE_FIELD.to_string(),
        display_name: PRICE_DISPLAY_NAME.to_string(),
        facet_values: Vec::new(),
    };
    for bucket in &price.buckets {
        let filter = FilterSelection::range(PRICE_FIELD, bucket.from.map(format_bound), bucket.to.map(format_bound))
            .with_display_name(PRICE_DISPLAY_NAME);
        let query_string = facet_link(&filter, applied_filters);
        price_facet.facet_values.push(facet_item(bucket_key(bucket)?, bucket.doc_count, filter, Some(query_string)));
    }

    let department = aggregations.get(DEPARTMENT_AGGREGATION).unwrap_or(&empty);
    let mut department_facet = SearchResultFacets {
        facet_field: DEPARTMENT_FIELD.to_string(),
        display_name: DEPARTMENT_DISPLAY_NAME.to_string(),
        facet_values: Vec::new(),
    };
    for bucket in &department.buckets {
        let key = bucket_key(bucket)?;
        let filter = FilterSelection::terms(DEPARTMENT_FIELD, Some(key.clone())).with_display_name(DEPARTMENT_DISPLAY_NAME);
        // Products without a department are counted under the placeholder key,
        // which no term filter can select.
        let query_string = (key != DEPARTMENT_MISSING).then(|| facet_link(&filter, applied_filters));
        department_facet.facet_values.push(facet_item(key, bucket.doc_count, filter, query_string));
    }

    let missing_images = aggregations.get(MISSING_IMAGES_AGGREGATION).and_then(|agg| agg.doc_count);

    Ok((vec![price_facet, department_facet], missing_images))
}

/// Current filters with this facet's field narrowed to the bucket.
fn facet_link(filter: &FilterSelection, applied_filters: &AppliedFilters) -> String {
    let mut link = applied_filters.clone();
    link.remove_filter(&filter.name);
    link.push_selection(filter);
    link.to_query_string()
}

fn facet_item(display_string: String, count: u64, filter: FilterSelection, query_string: Option<String>) -> SearchResultFacetItem {
    SearchResultFacetItem {
        display_string,
        count,
        filter,
        query_string,
    }
}

fn bucket_key(bucket: &RawSearchResultAggregationBucket) -> Result<String> {
    match &bucket.key {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(SearchError::UnexpectedResponse(format!("Invalid facet bucket key: {:#?}", other))),
    }
}

/// Bucket edges come back as floats; whole values print without a fraction.
fn format_bound(value: f64) -> String {
    value.to_string()
}
