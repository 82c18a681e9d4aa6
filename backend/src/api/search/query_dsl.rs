//! Typed model of the OpenSearch query DSL subset the search page sends.
//!
//! Every clause is a tagged variant that serialises to exactly the JSON the
//! backend expects, so a query document can only be assembled from known
//! shapes.

use std::collections::BTreeMap;
use std::fmt::Display;

use common::search_const::UNBOUNDED_HIGH;
use common::search_query::SortDirection;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub size: u64,
    pub sort: SortClause,
    pub query: QueryClause,
    pub aggs: BTreeMap<String, Aggregation>,
}

/// Single-field sort, serialised as `{ field: direction }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub field: String,
    pub direction: SortDirection,
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.direction)?;
        map.end()
    }
}


#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    FunctionScore(FunctionScoreQuery),
    Bool(BoolQuery),
    SimpleQueryString(SimpleQueryString),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    pub must: Vec<QueryClause>,
    pub filter: Vec<FilterClause>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleQueryString {
    pub fields: Vec<WeightedField>,
    pub query: String,
}

/// Field name with an optional boost, rendered as `name^boost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedField {
    pub name: String,
    pub boost: Option<u32>,
}

impl WeightedField {
    pub fn new(name: impl Into<String>, boost: Option<u32>) -> Self {
        Self { name: name.into(), boost }
    }
}

impl Display for WeightedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.boost {
            Some(boost) => write!(f, "{}^{}", self.name, boost),
            None => f.write_str(&self.name),
        }
    }
}

impl Serialize for WeightedField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


/// Non-scoring constraint placed in the `bool.filter` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterClause {
    Range(RangeFilter),
    Term(TermFilter),
}

/// Inclusive range on one field, serialised as `{ field: { gte, lte } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter {
    pub field: String,
    pub gte: RangeBound,
    pub lte: RangeBound,
}

impl Serialize for RangeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Bounds<'a> {
            gte: &'a RangeBound,
            lte: &'a RangeBound,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &Bounds { gte: &self.gte, lte: &self.lte })?;
        map.end()
    }
}

/// Exact match on one field, serialised as `{ field: value }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFilter {
    pub field: String,
    pub value: String,
}

impl Serialize for TermFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

/// One end of a range filter.
///
/// Caller-supplied bounds are passed through verbatim; the backend parses
/// them against the field's mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeBound {
    Given(String),
    /// Lower bound used when the request has none.
    Zero,
    /// Upper bound used when the request has none. Rendered as
    /// [`UNBOUNDED_HIGH`] on the wire and in links.
    Unbounded,
}

impl RangeBound {
    /// Resolves a raw `{name}.from` value; absent, empty and `0` all mean zero.
    pub fn lower(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("0") => RangeBound::Zero,
            Some(value) => RangeBound::Given(value.to_string()),
        }
    }

    /// Resolves a raw `{name}.to` value; absent, empty and the sentinel text all
    /// mean unbounded.
    pub fn upper(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => RangeBound::Unbounded,
            Some(value) if value == UNBOUNDED_HIGH.to_string() => RangeBound::Unbounded,
            Some(value) => RangeBound::Given(value.to_string()),
        }
    }
}

impl Display for RangeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeBound::Given(value) => f.write_str(value),
            RangeBound::Zero => f.write_str("0"),
            RangeBound::Unbounded => write!(f, "{}", UNBOUNDED_HIGH),
        }
    }
}

impl Serialize for RangeBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RangeBound::Given(value) => serializer.serialize_str(value),
            RangeBound::Zero => serializer.serialize_u64(0),
            RangeBound::Unbounded => serializer.serialize_i64(UNBOUNDED_HIGH),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionScoreQuery {
    pub query: Box<QueryClause>,
    pub boost_mode: BoostMode,
    pub score_mode: ScoreMode,
    pub functions: Vec<ScoreFunction>,
}

/// How the combined function score is merged with the query score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostMode {
    Multiply,
}

/// How the individual function scores are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    Avg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFunction {
    FieldValueFactor(FieldValueFactor),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValueFactor {
    pub field: String,
    pub modifier: FieldValueModifier,
    /// Value assumed for documents without the field.
    pub missing: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValueModifier {
    Reciprocal,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Range(RangeAggregation),
    Missing(MissingAggregation),
    Terms(TermsAggregation),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeAggregation {
    pub field: String,
    pub ranges: Vec<AggregationRange>,
}

/// Half-open bucket `[from, to)`; either end may be open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingAggregation {
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermsAggregation {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
    pub size: u64,
    pub min_doc_count: u64,
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_filter_serializes_field_keyed() {
        let filter = FilterClause::Range(RangeFilter {
            field: "regularPrice".to_string(),
            gte: RangeBound::Given("100".to_string()),
            lte: RangeBound::Unbounded,
        });
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"range": {"regularPrice": {"gte": "100", "lte": 9223372036854775807_i64}}})
        );
    }

    #[test]
    fn test_term_filter_serializes_field_keyed() {
        let filter = FilterClause::Term(TermFilter { field: "department".to_string(), value: "Electronics".to_string() });
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({"term": {"department": "Electronics"}}));
    }

    #[test]
    fn test_range_bound_resolution() {
        assert_eq!(RangeBound::lower(None), RangeBound::Zero);
        assert_eq!(RangeBound::lower(Some("")), RangeBound::Zero);
        assert_eq!(RangeBound::lower(Some("0")), RangeBound::Zero);
        assert_eq!(RangeBound::lower(Some("12.5")), RangeBound::Given("12.5".to_string()));
        assert_eq!(RangeBound::upper(None), RangeBound::Unbounded);
        assert_eq!(RangeBound::upper(Some("9223372036854775807")), RangeBound::Unbounded);
        assert_eq!(RangeBound::upper(Some("200")), RangeBound::Given("200".to_string()));
        assert_eq!(RangeBound::Zero.to_string(), "0");
        assert_eq!(RangeBound::Unbounded.to_string(), "9223372036854775807");
    }

    #[test]
    fn test_weighted_field_rendering() {
        assert_eq!(serde_json::to_value(WeightedField::new("name", Some(100))).unwrap(), json!("name^100"));
        assert_eq!(serde_json::to_value(WeightedField::new("department", None)).unwrap(), json!("department"));
    }

    #[test]
    fn test_sort_clause_serialization() {
        let sort = SortClause { field: "_score".to_string(), direction: SortDirection::Desc };
        assert_eq!(serde_json::to_value(&sort).unwrap(), json!({"_score": "desc"}));
    }

    #[test]
    fn test_aggregation_range_skips_open_ends() {
        let range = AggregationRange { from: None, to: Some(100), key: "$".to_string() };
        assert_eq!(serde_json::to_value(&range).unwrap(), json!({"to": 100, "key": "$"}));
    }
}
