//! Decoding of search requests from URL query strings and form bodies.
//!
//! Filters arrive as repeated `filter.name` values, each with its settings
//! under `{name}.type`, `{name}.displayName`, `{name}.from`, `{name}.to` and
//! `{name}.key`.

use common::search_const::{DEFAULT_SORT_FIELD, MATCH_ALL};
use common::search_query::{FilterKind, FilterSelection, SearchRequest, SortDirection};
use url::form_urlencoded;

use crate::api::search::applied_filters::FILTER_NAME_PARAM;

pub const QUERY_PARAM: &str = "query";
pub const SORT_PARAM: &str = "sort";
pub const SORT_DIR_PARAM: &str = "sortDir";

/// Ordered key/value pairs of one request; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self { pairs: form_urlencoded::parse(raw.as_bytes()).into_owned().collect() }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Like [`Self::get`] but treats an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs.iter().filter(move |(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

impl From<Vec<(String, String)>> for RequestParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}


pub fn decode_filter_selection(params: &RequestParams, name: &str) -> FilterSelection {
    FilterSelection {
        name: name.to_string(),
        kind: FilterKind::from_param(params.get(&format!("{name}.type"))),
        display_name: params.get(&format!("{name}.displayName")).unwrap_or(name).to_string(),
        range_from: params.get_non_empty(&format!("{name}.from")).map(str::to_string),
        range_to: params.get_non_empty(&format!("{name}.to")).map(str::to_string),
        term_key: params.get(&format!("{name}.key")).map(str::to_string),
    }
}

/// Every `filter.name` in request order.
pub fn decode_filters(params: &RequestParams) -> Vec<FilterSelection> {
    params.get_all(FILTER_NAME_PARAM).map(|name| decode_filter_selection(params, name)).collect()
}

/// Search from a link (GET): query text, sort and the applied filters.
///
/// A missing `query` matches everything; an empty one is kept and resolved by
/// the query compiler.
pub fn search_request_from_query(params: &RequestParams) -> SearchRequest {
    SearchRequest {
        query_string: params.get(QUERY_PARAM).unwrap_or(MATCH_ALL).to_string(),
        sort: decode_sort(params),
        sort_direction: decode_sort_direction(params),
        filters: decode_filters(params),
    }
}

/// Search from the search box (POST form): a new query starts without filters.
pub fn search_request_from_form(params: &RequestParams) -> SearchRequest {
    SearchRequest {
        query_string: params.get_non_empty(QUERY_PARAM).unwrap_or(MATCH_ALL).to_string(),
        sort: decode_sort(params),
        sort_direction: decode_sort_direction(params),
        filters: Vec::new(),
    }
}

fn decode_sort(params: &RequestParams) -> String {
    params.get_non_empty(SORT_PARAM).unwrap_or(DEFAULT_SORT_FIELD).to_string()
}

fn decode_sort_direction(params: &RequestParams) -> SortDirection {
    match params.get_non_empty(SORT_DIR_PARAM) {
        None => SortDirection::default(),
        Some(raw) => SortDirection::parse(raw).unwrap_or_else(|| {
            tracing::warn!("Unknown sort direction {:?}, using {}", raw, SortDirection::default());
            SortDirection::default()
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_string() {
        let request = search_request_from_query(&RequestParams::parse(""));
        assert_eq!(request, SearchRequest::default());
    }

    #[test]
    fn test_terms_filter_defaults_display_name() {
        let params = RequestParams::parse("?query=tv&filter.name=x&x.type=terms&x.key=a");
        let request = search_request_from_query(&params);

        assert_eq!(request.query_string, "tv");
        assert_eq!(request.filters, vec![FilterSelection::terms("x", Some("a"))]);
        assert_eq!(request.filters[0].display_name, "x");
    }

    #[test]
    fn test_range_filter_and_sort() {
        let params = RequestParams::parse(
            "query=ipod&sort=regularPrice&sortDir=asc&filter.name=regularPrice&regularPrice.type=range\
             &regularPrice.displayName=Price&regularPrice.from=100&regularPrice.to=",
        );
        let request = search_request_from_query(&params);

        assert_eq!(request.sort, "regularPrice");
        assert_eq!(request.sort_direction, SortDirection::Asc);
        assert_eq!(
            request.filters,
            vec![FilterSelection::range("regularPrice", Some("100"), None::<String>).with_display_name("Price")]
        );
    }

    #[test]
    fn test_filters_keep_request_order() {
        let params = RequestParams::parse("filter.name=b&filter.name=a&a.type=terms&b.type=range");
        let names = decode_filters(&params).into_iter().map(|f| f.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_missing_type_is_unknown() {
        let params = RequestParams::parse("filter.name=color&color.key=red");
        let filters = decode_filters(&params);
        assert_eq!(filters[0].kind, FilterKind::Unknown(String::new()));
        assert_eq!(filters[0].term_key.as_deref(), Some("red"));
    }

    #[test]
    fn test_empty_key_is_kept() {
        let params = RequestParams::parse("filter.name=department&department.type=terms&department.key=");
        assert_eq!(decode_filters(&params)[0].term_key.as_deref(), Some(""));
    }

    #[test]
    fn test_bad_sort_direction_falls_back() {
        let params = RequestParams::parse("sortDir=sideways");
        assert_eq!(search_request_from_query(&params).sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_form_ignores_filters_and_empty_values() {
        let params = RequestParams::parse("query=&sort=&sortDir=&filter.name=department&department.type=terms");
        let request = search_request_from_form(&params);
        assert_eq!(request, SearchRequest::default());
    }

    #[test]
    fn test_get_keeps_empty_query() {
        let request = search_request_from_query(&RequestParams::parse("query="));
        assert_eq!(request.query_string, "");
        assert_eq!(request.effective_query(), "*");
    }
}
