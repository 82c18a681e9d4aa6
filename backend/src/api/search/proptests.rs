//! Property-based tests for filter compilation.

#[cfg(test)]
mod tests {
    use common::search_query::{FilterKind, FilterSelection, SortDirection};
    use proptest::prelude::*;

    use crate::api::search::filters::compile_filters;
    use crate::api::search::query_dsl::{FilterClause, RangeBound};
    use crate::api::search::request_params::{RequestParams, decode_filters};
    use crate::api::search::{PRICE_FIELD, compile_query, facets_from_aggregations, price_ranges};

    fn field_name() -> impl Strategy<Value = String> {
        prop_oneof![Just(PRICE_FIELD.to_string()), "[a-zA-Z][a-zA-Z0-9_]{0,11}"]
    }

    fn bound() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[1-9][0-9]{0,5}(\\.[0-9]{1,2})?")
    }

    fn selection() -> impl Strategy<Value = FilterSelection> {
        prop_oneof![
            (field_name(), bound(), bound(), "\\PC{0,12}").prop_map(|(name, from, to, display)| {
                FilterSelection::range(name, from, to).with_display_name(display)
            }),
            (field_name(), prop::option::of("\\PC{0,12}"), "\\PC{0,12}").prop_map(|(name, key, display)| {
                FilterSelection::terms(name, key).with_display_name(display)
            }),
        ]
    }

    /// Selections with distinct names; parameters are looked up by name.
    fn selections() -> impl Strategy<Value = Vec<FilterSelection>> {
        prop::collection::vec(selection(), 0..4).prop_filter("distinct filter names", |selections| {
            let names = selections.iter().map(|s| s.name.as_str()).collect::<std::collections::HashSet<_>>();
            names.len() == selections.len()
        })
    }

    proptest! {
        #[test]
        fn test_range_bounds_pass_through(name in field_name(), from in 1u32..100_000, to in 1u32..100_000) {
            let compiled = compile_filters(&[FilterSelection::range(name, Some(from.to_string()), Some(to.to_string()))]);
            match &compiled.clauses[0] {
                FilterClause::Range(range) => {
                    prop_assert_eq!(&range.gte, &RangeBound::Given(from.to_string()));
                    prop_assert_eq!(&range.lte, &RangeBound::Given(to.to_string()));
                }
                other => prop_assert!(false, "expected range clause, got {:?}", other),
            }
        }

        #[test]
        fn test_applied_filters_roundtrip(selections in selections()) {
            let compiled = compile_filters(&selections);
            let params = RequestParams::parse(&compiled.applied_filters.to_query_string());
            let decoded = decode_filters(&params);

            prop_assert_eq!(decoded.len(), selections.len());
            for (original, decoded) in selections.iter().zip(&decoded) {
                prop_assert_eq!(&decoded.name, &original.name);
                prop_assert_eq!(&decoded.kind, &original.kind);
                prop_assert_eq!(&decoded.display_name, &original.display_name);
            }

            let recompiled = compile_filters(&decoded);
            prop_assert_eq!(&recompiled.clauses, &compiled.clauses);
            prop_assert_eq!(&recompiled.display_filters, &compiled.display_filters);
            prop_assert_eq!(recompiled.applied_filters.to_query_string(), compiled.applied_filters.to_query_string());
        }

        #[test]
        fn test_price_link_narrows_to_bucket(selections in selections(), from in 1u32..1000, width in 1u32..1000) {
            let compiled = compile_filters(&selections);
            let aggregations = serde_json::from_value(serde_json::json!({"regularPrice": {"buckets": [
                {"key": "$$", "from": f64::from(from), "to": f64::from(from + width), "doc_count": 1}
            ]}})).unwrap();
            let (facets, _) = facets_from_aggregations(&aggregations, &compiled.applied_filters).unwrap();
            let link = facets[0].facet_values[0].query_string.clone().unwrap();

            let decoded = decode_filters(&RequestParams::parse(&link));
            let price = decoded.iter().filter(|s| s.name == PRICE_FIELD).collect::<Vec<_>>();
            prop_assert_eq!(price.len(), 1);
            prop_assert_eq!(price[0].range_from.clone(), Some(from.to_string()));
            prop_assert_eq!(price[0].range_to.clone(), Some((from + width).to_string()));
            let others = selections.iter().filter(|s| s.name != PRICE_FIELD).count();
            prop_assert_eq!(decoded.len(), others + 1);
        }

        #[test]
        fn test_unknown_kinds_emit_nothing(name in field_name(), kind in "[a-z]{1,8}") {
            prop_assume!(kind != "range" && kind != "terms");
            let compiled = compile_filters(&[FilterSelection::new(name, FilterKind::Unknown(kind))]);
            prop_assert!(compiled.clauses.is_empty());
            prop_assert!(compiled.display_filters.is_empty());
            prop_assert_eq!(compiled.applied_filters.pairs().len(), 3);
        }

        #[test]
        fn test_price_buckets_ignore_filters(selections in selections(), text in "\\PC{0,10}") {
            let compiled = compile_filters(&selections);
            let query = compile_query(&text, compiled.clauses, "_score", SortDirection::Desc);
            let value = serde_json::to_value(&query).unwrap();
            prop_assert_eq!(
                value["aggs"]["regularPrice"]["range"]["ranges"].clone(),
                serde_json::to_value(price_ranges()).unwrap()
            );
            prop_assert_eq!(price_ranges().len(), 6);
        }
    }
}
