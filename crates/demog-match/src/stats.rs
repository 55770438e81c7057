use std::collections::BTreeMap;

use demog_model::{
    Algorithm, GroupCounts, KeywordCategory, MatchResult, ScoreHistogram, ScoreSummary, Stats,
    Threshold, Vocabulary,
};

/// Group key for records whose group cell is missing.
pub const MISSING_GROUP: &str = "N/A";

/// Accumulates [`Stats`] one result at a time, in batch order.
pub(crate) struct StatsBuilder<'a> {
    vocabulary: &'a Vocabulary,
    algorithm: Algorithm,
    threshold: Threshold,
    total: usize,
    matched: usize,
    groups: BTreeMap<String, GroupCounts>,
    histogram: ScoreHistogram,
    by_category: BTreeMap<KeywordCategory, usize>,
    min: u8,
    max: u8,
    sum: u64,
}

impl<'a> StatsBuilder<'a> {
    pub(crate) fn new(vocabulary: &'a Vocabulary, algorithm: Algorithm, threshold: Threshold) -> Self {
        Self {
            vocabulary,
            algorithm,
            threshold,
            total: 0,
            matched: 0,
            groups: BTreeMap::new(),
            histogram: ScoreHistogram::default(),
            by_category: BTreeMap::new(),
            min: u8::MAX,
            max: 0,
            sum: 0,
        }
    }

    pub(crate) fn record(&mut self, group: Option<&str>, result: &MatchResult) {
        self.total += 1;
        let counts = self
            .groups
            .entry(group.unwrap_or(MISSING_GROUP).to_string())
            .or_default();
        counts.total += 1;

        if result.matched {
            self.matched += 1;
            counts.matched += 1;
            let category = result
                .best_keyword
                .as_ref()
                .and_then(|keyword| self.vocabulary.category_of(keyword))
                .unwrap_or(KeywordCategory::Custom);
            *self.by_category.entry(category).or_insert(0) += 1;
        }

        self.histogram.record(result.best_score);
        self.min = self.min.min(result.best_score);
        self.max = self.max.max(result.best_score);
        self.sum += u64::from(result.best_score);
    }

    pub(crate) fn finish(self) -> Stats {
        let match_rate = if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        };
        let score_summary = (self.total > 0).then(|| ScoreSummary {
            min: self.min,
            max: self.max,
            mean: self.sum as f64 / self.total as f64,
        });
        Stats {
            algorithm: self.algorithm,
            threshold: self.threshold,
            total: self.total,
            matched: self.matched,
            match_rate,
            groups: self.groups,
            histogram: self.histogram,
            by_category: self.by_category,
            score_summary,
        }
    }
}
