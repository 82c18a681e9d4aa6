//! API operations and module exports.

pub mod search;
