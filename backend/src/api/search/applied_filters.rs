//! Query-string echo of the filters applied to a search.
//!
//! Links on the results page (facets, sort controls) carry this fragment so
//! the next search keeps the current filters. Pairs are collected in order
//! and serialised once.

use common::search_query::FilterSelection;
use url::form_urlencoded;

use crate::api::search::query_dsl::RangeBound;

pub const FILTER_NAME_PARAM: &str = "filter.name";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedFilters {
    pairs: Vec<(String, String)>,
}

impl AppliedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// `filter.name`, `{name}.type` and `{name}.displayName`.
    pub fn push_identity(&mut self, selection: &FilterSelection) {
        let name = &selection.name;
        self.push(FILTER_NAME_PARAM, name.as_str());
        self.push(format!("{name}.type"), selection.kind.as_param());
        self.push(format!("{name}.displayName"), selection.display_name.as_str());
    }

    pub fn push_range(&mut self, name: &str, from: &RangeBound, to: &RangeBound) {
        self.push(format!("{name}.from"), from.to_string());
        self.push(format!("{name}.to"), to.to_string());
    }

    pub fn push_term(&mut self, name: &str, key: &str) {
        self.push(format!("{name}.key"), key);
    }

    /// Identity plus whichever raw parameters the selection carries, unresolved.
    pub fn push_selection(&mut self, selection: &FilterSelection) {
        self.push_identity(selection);
        let name = &selection.name;
        if let Some(key) = &selection.term_key {
            self.push_term(name, key);
        }
        if let Some(from) = &selection.range_from {
            self.push(format!("{name}.from"), from.as_str());
        }
        if let Some(to) = &selection.range_to {
            self.push(format!("{name}.to"), to.as_str());
        }
    }

    /// Drops the `filter.name` entry for `name` and every `{name}.*` setting.
    ///
    /// Settings are looked up by filter name, so a selection must be removed
    /// before another one on the same field is pushed.
    pub fn remove_filter(&mut self, name: &str) {
        let settings = ["type", "displayName", "from", "to", "key"].map(|setting| format!("{name}.{setting}"));
        self.pairs.retain(|(key, value)| {
            !(key == FILTER_NAME_PARAM && value == name) && !settings.contains(key)
        });
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Every pair as `&key=value`, form-urlencoded.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.pairs {
            out.push('&');
            out.push_str(&form_urlencoded::Serializer::new(String::new()).append_pair(key, value).finish());
        }
        out
    }
}
