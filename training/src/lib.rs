//! Labelled product-name records for training a category classifier.
//!
//! Each product is labelled with the parent of its leaf category (or the leaf
//! itself for single-level paths) and its name is normalised for the
//! classifier. Categories with too few products can be left out.

pub mod error;
pub mod normalize;
pub mod records;

pub use error::{Result, TrainingError};
pub use normalize::NameNormalizer;
pub use records::{Product, TrainingOptions, TrainingRecord, build_records, write_records};
