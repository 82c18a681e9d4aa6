//! Constants shared by the query compiler and the request layer.

/// Number of hits requested per search; only the first page is served.
pub const PAGE_SIZE: u64 = 10;

/// Query text that matches every document.
pub const MATCH_ALL: &str = "*";

/// Relevance score pseudo-field used as the default sort.
pub const DEFAULT_SORT_FIELD: &str = "_score";

/// Term key used when a terms filter arrives without one.
pub const DEFAULT_TERM_KEY: &str = "*";

/// Rendering of an open upper range bound on the wire and in links.
pub const UNBOUNDED_HIGH: i64 = i64::MAX;

/// Product catalog index searched when none is configured.
pub const DEFAULT_INDEX: &str = "bbuy_products";
