//! Search backend: query compilation, result shaping and the OpenSearch adapter.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod error;
pub mod server_extra;

pub use error::{Result, SearchError};
