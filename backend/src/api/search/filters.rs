//! Compilation of facet selections into backend filter clauses.

use common::search_const::DEFAULT_TERM_KEY;
use common::search_query::{FilterKind, FilterSelection};
use common::search_result::DisplayFilter;

use crate::api::search::applied_filters::AppliedFilters;
use crate::api::search::query_dsl::{FilterClause, RangeBound, RangeFilter, TermFilter};

/// Everything derived from the active filters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilters {
    /// Conjunctive constraints for the `bool.filter` list.
    pub clauses: Vec<FilterClause>,
    /// One line of text per applied range or terms filter.
    pub display_filters: Vec<DisplayFilter>,
    /// Echo of the selections for follow-up links.
    pub applied_filters: AppliedFilters,
}

pub fn compile_filters(selections: &[FilterSelection]) -> CompiledFilters {
    let mut compiled = CompiledFilters::default();

    for selection in selections {
        let name = selection.name.as_str();
        let display_name = selection.display_name.as_str();
        compiled.applied_filters.push_identity(selection);

        match &selection.kind {
            FilterKind::Range => {
                let from = RangeBound::lower(selection.range_from.as_deref());
                let to = RangeBound::upper(selection.range_to.as_deref());

                compiled.display_filters.push(DisplayFilter::new(format!(
                    "Bounding results using {display_name} between {from} and {to} inclusive."
                )));
                compiled.applied_filters.push_range(name, &from, &to);
                compiled.clauses.push(FilterClause::Range(RangeFilter {
                    field: name.to_string(),
                    gte: from,
                    lte: to,
                }));
            }
            FilterKind::Terms => {
                let key = selection.term_key.as_deref().unwrap_or(DEFAULT_TERM_KEY);

                compiled.display_filters.push(DisplayFilter::new(format!(
                    "Filtering via {display_name} on term \"{key}\"."
                )));
                compiled.applied_filters.push_term(name, key);
                compiled.clauses.push(FilterClause::Term(TermFilter {
                    field: name.to_string(),
                    value: key.to_string(),
                }));
            }
            FilterKind::Unknown(kind) => {
                tracing::warn!("Ignoring filter {:?} with unsupported type {:?}", name, kind);
            }
        }
    }

    tracing::debug!("Filters: {:?}", compiled.clauses);
    compiled
}
