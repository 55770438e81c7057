//! CLI library components for demographic column classification.

pub mod ingest;
pub mod logging;
pub mod output;
pub mod summary;
