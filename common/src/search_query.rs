//! Shared search query models and helpers.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::search_const::{DEFAULT_SORT_FIELD, MATCH_ALL};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Parses `asc` / `desc` case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


/// How a facet selection constrains its field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Range,
    Terms,
    /// Any other `type` value, kept verbatim so it can be echoed back.
    Unknown(String),
}

impl FilterKind {
    /// Maps the raw `{name}.type` parameter. A missing type is an unknown kind
    /// with empty text.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("range") => FilterKind::Range,
            Some("terms") => FilterKind::Terms,
            Some(other) => FilterKind::Unknown(other.to_string()),
            None => FilterKind::Unknown(String::new()),
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            FilterKind::Range => "range",
            FilterKind::Terms => "terms",
            FilterKind::Unknown(raw) => raw,
        }
    }
}


/// One user-chosen facet constraint, as read from the request.
///
/// Only the fields matching `kind` are meaningful: `range_from`/`range_to`
/// for ranges, `term_key` for terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    pub name: String,
    pub kind: FilterKind,
    pub display_name: String,
    pub range_from: Option<String>,
    pub range_to: Option<String>,
    pub term_key: Option<String>,
}

impl FilterSelection {
    pub fn new(name: impl Into<String>, kind: FilterKind) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            kind,
            range_from: None,
            range_to: None,
            term_key: None,
        }
    }

    pub fn range(name: impl Into<String>, from: Option<impl Into<String>>, to: Option<impl Into<String>>) -> Self {
        let mut selection = Self::new(name, FilterKind::Range);
        selection.range_from = from.map(Into::into);
        selection.range_to = to.map(Into::into);
        selection
    }

    pub fn terms(name: impl Into<String>, key: Option<impl Into<String>>) -> Self {
        let mut selection = Self::new(name, FilterKind::Terms);
        selection.term_key = key.map(Into::into);
        selection
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query_string: String,
    pub sort: String,
    pub sort_direction: SortDirection,
    pub filters: Vec<FilterSelection>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query_string: MATCH_ALL.to_string(),
            sort: DEFAULT_SORT_FIELD.to_string(),
            sort_direction: SortDirection::Desc,
            filters: Vec::new(),
        }
    }
}

impl SearchRequest {
    pub fn new(query_string: impl Into<String>) -> Self {
        Self { query_string: query_string.into(), ..Default::default() }
    }

    /// The text handed to the backend: never empty.
    pub fn effective_query(&self) -> &str {
        effective_query(&self.query_string)
    }
}

pub fn effective_query(query_string: &str) -> &str {
    if query_string.is_empty() { MATCH_ALL } else { query_string }
}
