//! Single-text matching against a keyword vocabulary.

use demog_model::{Algorithm, KeywordScore, MatchResult, Threshold, Vocabulary, normalize};

use crate::similarity::score;

/// Scores text against every keyword of a vocabulary with one algorithm.
///
/// Keywords are visited in vocabulary order and the first keyword reaching
/// the best score wins, so results are reproducible across runs.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    vocabulary: &'a Vocabulary,
    algorithm: Algorithm,
    threshold: Threshold,
}

impl<'a> Matcher<'a> {
    pub fn new(vocabulary: &'a Vocabulary, algorithm: Algorithm, threshold: Threshold) -> Self {
        Self {
            vocabulary,
            algorithm,
            threshold,
        }
    }

    pub fn vocabulary(&self) -> &'a Vocabulary {
        self.vocabulary
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Classifies one text value.
    ///
    /// `None`, blank text and an empty vocabulary never match, whatever the
    /// threshold. Otherwise the first keyword seeds the best score, so
    /// `matched == threshold.is_met_by(best_score)` holds exactly.
    pub fn classify(&self, text: Option<&str>) -> MatchResult {
        let normalized = text.map(normalize).unwrap_or_default();
        if normalized.is_empty() || self.vocabulary.is_empty() {
            return MatchResult::no_match(self.algorithm, self.threshold);
        }

        let mut best_keyword = None;
        let mut best_score = 0;
        for keyword in self.vocabulary.keywords() {
            let score = score(self.algorithm, &normalized, keyword.as_str());
            if best_keyword.is_none() || score > best_score {
                best_score = score;
                best_keyword = Some(keyword);
                if best_score == 100 {
                    break;
                }
            }
        }

        MatchResult {
            matched: self.threshold.is_met_by(best_score),
            best_keyword: best_keyword.cloned(),
            best_score,
            algorithm: self.algorithm,
            threshold: self.threshold,
        }
    }

    /// Every keyword's score, highest first; equal scores keep vocabulary order.
    pub fn score_all(&self, text: &str) -> Vec<KeywordScore> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut scores: Vec<KeywordScore> = self
            .vocabulary
            .entries()
            .iter()
            .map(|entry| KeywordScore {
                keyword: entry.keyword.clone(),
                category: entry.category,
                score: score(self.algorithm, &normalized, entry.keyword.as_str()),
            })
            .collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
    }
}

/// Classifies one text value; see [`Matcher::classify`].
pub fn classify(
    text: &str,
    vocabulary: &Vocabulary,
    algorithm: Algorithm,
    threshold: Threshold,
) -> MatchResult {
    Matcher::new(vocabulary, algorithm, threshold).classify(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(value: i64) -> Threshold {
        Threshold::new(value).unwrap()
    }

    #[test]
    fn test_empty_text_never_matches() {
        let vocabulary = Vocabulary::demographic();
        for algorithm in Algorithm::ALL {
            let result = classify("   ", &vocabulary, algorithm, threshold(80));
            assert!(!result.matched);
            assert_eq!(result.best_score, 0);
            assert_eq!(result.best_keyword, None);
        }
        let matcher = Matcher::new(&vocabulary, Algorithm::Ratio, threshold(0));
        assert!(!matcher.classify(None).matched);
    }

    #[test]
    fn test_empty_vocabulary_never_matches() {
        let vocabulary = Vocabulary::new();
        for algorithm in Algorithm::ALL {
            let result = classify("age", &vocabulary, algorithm, threshold(0));
            assert!(!result.matched);
            assert_eq!(result.best_score, 0);
            assert_eq!(result.best_keyword, None);
        }
    }

    #[test]
    fn test_zero_scores_keep_first_keyword() {
        let vocabulary = Vocabulary::from_terms(["age", "dob"]);
        let result = classify("qqq", &vocabulary, Algorithm::Ratio, threshold(0));
        assert_eq!(result.best_score, 0);
        assert_eq!(result.keyword_str(), "age");
        assert!(result.matched);
    }

    #[test]
    fn test_text_is_normalized() {
        let vocabulary = Vocabulary::from_terms(["gender"]);
        let result = classify("  GENDER ", &vocabulary, Algorithm::Ratio, threshold(100));
        assert!(result.matched);
        assert_eq!(result.best_score, 100);
    }

    #[test]
    fn test_first_keyword_wins_ties() {
        let vocabulary = Vocabulary::from_terms(["rage", "race"]);
        let result = classify("rare", &vocabulary, Algorithm::Ratio, threshold(50));
        assert_eq!(result.best_keyword.unwrap().as_str(), "rage");
        assert_eq!(result.best_score, 75);

        let reversed = Vocabulary::from_terms(["race", "rage"]);
        let result = classify("rare", &reversed, Algorithm::Ratio, threshold(50));
        assert_eq!(result.best_keyword.unwrap().as_str(), "race");
    }

    #[test]
    fn test_partial_ratio_finds_embedded_keyword() {
        let vocabulary = Vocabulary::from_terms(["age"]);
        let result = classify(
            "Patient age at time of diagnosis",
            &vocabulary,
            Algorithm::PartialRatio,
            threshold(80),
        );
        assert!(result.matched);
        assert_eq!(result.keyword_str(), "age");
    }

    #[test]
    fn test_unrelated_text_below_threshold() {
        let vocabulary = Vocabulary::from_terms(["race", "gender", "age"]);
        let result = classify(
            "Insurance claim numbers",
            &vocabulary,
            Algorithm::Ratio,
            threshold(80),
        );
        assert!(!result.matched);
        assert!(result.best_score < 50, "got {}", result.best_score);
    }

    #[test]
    fn test_matched_follows_threshold() {
        let vocabulary = Vocabulary::from_terms(["gender"]);
        let at = classify("genders", &vocabulary, Algorithm::Ratio, threshold(92));
        assert_eq!(at.best_score, 92);
        assert!(at.matched);
        let above = classify("genders", &vocabulary, Algorithm::Ratio, threshold(93));
        assert!(!above.matched);
    }

    #[test]
    fn test_score_all_sorted_with_stable_ties() {
        let vocabulary = Vocabulary::from_terms(["race", "rage", "age"]);
        let matcher = Matcher::new(&vocabulary, Algorithm::Ratio, threshold(80));
        let scores = matcher.score_all("rare");
        let order: Vec<_> = scores.iter().map(|s| s.keyword.as_str()).collect();
        assert_eq!(order, vec!["race", "rage", "age"]);
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(matcher.score_all("").is_empty());
    }
}
