//! Search query compilation and search API operations.

pub mod query_dsl;
pub mod applied_filters;
pub mod filters;
pub mod request_params;

mod search_dsl;
pub use search_dsl::{build_aggregations, compile_query, compile_search, price_ranges};
pub use search_dsl::{DEPARTMENT_FIELD, PRICE_FIELD, PRICE_BREAKPOINTS};

mod search_for_results;
pub use search_for_results::{search_for_results, shape_search_response};

mod search_facets;
pub use search_facets::facets_from_aggregations;

#[cfg(test)]
mod proptests;
