//! Query document builder for the product search page.

use std::collections::BTreeMap;

use common::search_const::{DEFAULT_SORT_FIELD, PAGE_SIZE};
use common::search_query::{SearchRequest, SortDirection, effective_query};

use crate::api::search::filters::{CompiledFilters, compile_filters};
use crate::api::search::query_dsl::{
    Aggregation, AggregationRange, BoolQuery, BoostMode, CompiledQuery, FieldValueFactor, FieldValueModifier,
    FilterClause, FunctionScoreQuery, MissingAggregation, QueryClause, RangeAggregation, ScoreFunction, ScoreMode,
    SimpleQueryString, SortClause, TermsAggregation, WeightedField,
};

/// Text fields searched by the free-text clause, highest weight first.
pub const TEXT_FIELDS: [(&str, Option<u32>); 4] = [
    ("name", Some(100)),
    ("shortDescription", Some(25)),
    ("longDescription", Some(10)),
    ("department", None),
];

pub const SALES_RANK_FIELDS: [&str; 3] = ["salesRankShortTerm", "salesRankMediumTerm", "salesRankLongTerm"];

/// Stand-in rank for products without sales data; its reciprocal is near zero.
pub const SALES_RANK_MISSING: u64 = 100_000_000;

pub const PRICE_AGGREGATION: &str = "regularPrice";
pub const PRICE_FIELD: &str = "regularPrice";
pub const PRICE_BREAKPOINTS: [u64; 5] = [100, 200, 300, 400, 500];

pub const MISSING_IMAGES_AGGREGATION: &str = "missing_images";
pub const IMAGE_FIELD: &str = "image.keyword";

pub const DEPARTMENT_AGGREGATION: &str = "department";
pub const DEPARTMENT_FIELD: &str = "department.keyword";
pub const DEPARTMENT_MISSING: &str = "N/A";
pub const DEPARTMENT_BUCKETS: u64 = 10;


pub fn compile_query(
    query_string: &str,
    filters: Vec<FilterClause>,
    sort: &str,
    sort_direction: SortDirection,
) -> CompiledQuery {
    let query_string = effective_query(query_string);
    let sort = if sort.is_empty() { DEFAULT_SORT_FIELD } else { sort };
    tracing::debug!("Query: {} Filters: {:?} Sort: {} {}", query_string, filters, sort, sort_direction);

    let text_clause = QueryClause::SimpleQueryString(SimpleQueryString {
        fields: TEXT_FIELDS.iter().map(|(name, boost)| WeightedField::new(*name, *boost)).collect(),
        query: query_string.to_string(),
    });

    let functions = SALES_RANK_FIELDS
        .iter()
        .map(|field| {
            ScoreFunction::FieldValueFactor(FieldValueFactor {
                field: field.to_string(),
                modifier: FieldValueModifier::Reciprocal,
                missing: SALES_RANK_MISSING,
            })
        })
        .collect();

    CompiledQuery {
        size: PAGE_SIZE,
        sort: SortClause { field: sort.to_string(), direction: sort_direction },
        query: QueryClause::FunctionScore(FunctionScoreQuery {
            query: Box::new(QueryClause::Bool(BoolQuery { must: vec![text_clause], filter: filters })),
            boost_mode: BoostMode::Multiply,
            score_mode: ScoreMode::Avg,
            functions,
        }),
        aggs: build_aggregations(),
    }
}

/// Compiles the request's filters and the full query document in one go.
pub fn compile_search(request: &SearchRequest) -> (CompiledQuery, CompiledFilters) {
    let filters = compile_filters(&request.filters);
    let query = compile_query(&request.query_string, filters.clauses.clone(), &request.sort, request.sort_direction);
    (query, filters)
}

/// Facet aggregations, requested independently of the applied filters.
pub fn build_aggregations() -> BTreeMap<String, Aggregation> {
    let mut aggs = BTreeMap::new();
    aggs.insert(
        PRICE_AGGREGATION.to_string(),
        Aggregation::Range(RangeAggregation { field: PRICE_FIELD.to_string(), ranges: price_ranges() }),
    );
    aggs.insert(
        MISSING_IMAGES_AGGREGATION.to_string(),
        Aggregation::Missing(MissingAggregation { field: IMAGE_FIELD.to_string() }),
    );
    aggs.insert(
        DEPARTMENT_AGGREGATION.to_string(),
        Aggregation::Terms(TermsAggregation {
            field: DEPARTMENT_FIELD.to_string(),
            missing: Some(DEPARTMENT_MISSING.to_string()),
            size: DEPARTMENT_BUCKETS,
            min_doc_count: 0,
        }),
    );
    aggs
}

/// `$` below the first breakpoint, one more `$` per breakpoint crossed.
pub fn price_ranges() -> Vec<AggregationRange> {
    (0..=PRICE_BREAKPOINTS.len())
        .map(|i| AggregationRange {
            from: if i == 0 { None } else { Some(PRICE_BREAKPOINTS[i - 1]) },
            to: PRICE_BREAKPOINTS.get(i).copied(),
            key: "$".repeat(i + 1),
        })
        .collect()
}
