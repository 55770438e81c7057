//! Fuzzy keyword matching for classifying column metadata as demographic.
//!
//! - [`similarity`]: the four string similarity measures.
//! - [`Matcher`]: best keyword and score for a single text.
//! - [`BatchClassifier`]: records in, classified records and [`Stats`](demog_model::Stats) out.

#![deny(unsafe_code)]

pub mod batch;
pub mod matcher;
pub mod similarity;
mod stats;

pub use batch::{
    BatchClassifier, Classification, ClassifiedRecord, DEFAULT_EXPORT_PARTS, classify_all,
    part_ranges,
};
pub use matcher::{Matcher, classify};
pub use similarity::score;
pub use stats::MISSING_GROUP;
