pub mod opensearch_utils;
