//! Classification outputs: per-record results and batch statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::config::Threshold;
use crate::keyword::{Keyword, KeywordCategory};

/// Outcome of scoring one text against a vocabulary.
///
/// `matched` always equals `threshold.is_met_by(best_score)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    pub best_keyword: Option<Keyword>,
    pub best_score: u8,
    pub algorithm: Algorithm,
    pub threshold: Threshold,
}

impl MatchResult {
    /// Result for empty text or an empty vocabulary.
    pub fn no_match(algorithm: Algorithm, threshold: Threshold) -> Self {
        Self {
            matched: false,
            best_keyword: None,
            best_score: 0,
            algorithm,
            threshold,
        }
    }

    pub fn keyword_str(&self) -> &str {
        self.best_keyword.as_ref().map_or("", Keyword::as_str)
    }
}

/// Score of a single keyword, used when explaining a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub keyword: Keyword,
    pub category: KeywordCategory,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCounts {
    pub matched: usize,
    pub total: usize,
}

impl GroupCounts {
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

pub const HISTOGRAM_BUCKETS: usize = 10;

/// Best-score counts by decile; the last bucket covers 90-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistogram {
    pub buckets: [usize; HISTOGRAM_BUCKETS],
}

impl ScoreHistogram {
    pub fn bucket_for(score: u8) -> usize {
        usize::from(score / 10).min(HISTOGRAM_BUCKETS - 1)
    }

    pub fn bucket_label(bucket: usize) -> String {
        let low = bucket * 10;
        if bucket + 1 >= HISTOGRAM_BUCKETS {
            format!("{low}-100")
        } else {
            format!("{low}-{}", low + 9)
        }
    }

    pub fn record(&mut self, score: u8) {
        self.buckets[Self::bucket_for(score)] += 1;
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
}

/// Aggregates over one batch run, consumed by reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub algorithm: Algorithm,
    pub threshold: Threshold,
    pub total: usize,
    pub matched: usize,
    /// `matched / total`, or 0 for an empty batch.
    pub match_rate: f64,
    /// Counts keyed by the group field value.
    pub groups: BTreeMap<String, GroupCounts>,
    pub histogram: ScoreHistogram,
    /// Matched records by the category of their best keyword.
    pub by_category: BTreeMap<KeywordCategory, usize>,
    pub score_summary: Option<ScoreSummary>,
}

impl Stats {
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }

    /// Number of distinct group values seen.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_buckets_by_decile() {
        assert_eq!(ScoreHistogram::bucket_for(0), 0);
        assert_eq!(ScoreHistogram::bucket_for(9), 0);
        assert_eq!(ScoreHistogram::bucket_for(10), 1);
        assert_eq!(ScoreHistogram::bucket_for(89), 8);
        assert_eq!(ScoreHistogram::bucket_for(90), 9);
        assert_eq!(ScoreHistogram::bucket_for(100), 9);
    }

    #[test]
    fn histogram_labels() {
        assert_eq!(ScoreHistogram::bucket_label(0), "0-9");
        assert_eq!(ScoreHistogram::bucket_label(4), "40-49");
        assert_eq!(ScoreHistogram::bucket_label(9), "90-100");
    }

    #[test]
    fn group_rate_handles_empty() {
        assert_eq!(GroupCounts::default().rate(), 0.0);
        let counts = GroupCounts { matched: 1, total: 4 };
        assert!((counts.rate() - 0.25).abs() < f64::EPSILON);
    }
}
