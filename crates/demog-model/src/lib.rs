//! Data model for classifying column metadata records as demographic.

#![deny(unsafe_code)]

pub mod algorithm;
pub mod config;
pub mod error;
pub mod keyword;
pub mod record;
pub mod result;

pub use algorithm::Algorithm;
pub use config::{DEFAULT_GROUP_FIELD, DEFAULT_TEXT_FIELD, DEFAULT_THRESHOLD, MatchConfig, Threshold};
pub use error::{DemogError, MissingColumn, Result};
pub use keyword::{Keyword, KeywordCategory, Vocabulary, VocabularyEntry, normalize};
pub use record::{CellValue, Field, Record};
pub use result::{
    GroupCounts, HISTOGRAM_BUCKETS, KeywordScore, MatchResult, ScoreHistogram, ScoreSummary, Stats,
};
