//! Property tests for the similarity measures.

use demog_match::similarity::{partial_ratio, ratio, token_set_ratio, token_sort_ratio};
use demog_match::{classify, score};
use demog_model::{Algorithm, Threshold, Vocabulary};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "[a-z ,_-]{0,16}"
}

proptest! {
    #[test]
    fn ratio_of_identical_strings_is_100(a in text()) {
        prop_assert_eq!(ratio(&a, &a), 100);
    }

    #[test]
    fn ratio_is_symmetric(a in text(), b in text()) {
        prop_assert_eq!(ratio(&a, &b), ratio(&b, &a));
    }

    #[test]
    fn token_sort_is_symmetric(a in text(), b in text()) {
        prop_assert_eq!(token_sort_ratio(&a, &b), token_sort_ratio(&b, &a));
    }

    #[test]
    fn token_set_is_symmetric(a in text(), b in text()) {
        prop_assert_eq!(token_set_ratio(&a, &b), token_set_ratio(&b, &a));
    }

    #[test]
    fn scores_stay_in_range(a in text(), b in text()) {
        for algorithm in Algorithm::ALL {
            prop_assert!(score(algorithm, &a, &b) <= 100);
        }
    }

    #[test]
    fn partial_ratio_finds_verbatim_substrings(prefix in "[a-z ]{0,8}", needle in "[a-z]{1,8}", suffix in "[a-z ]{0,8}") {
        let haystack = format!("{prefix}{needle}{suffix}");
        prop_assert_eq!(partial_ratio(&haystack, &needle), 100);
    }

    #[test]
    fn token_sort_ignores_word_order(words in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let forward = words.join(" ");
        let mut reversed = words.clone();
        reversed.reverse();
        prop_assert_eq!(token_sort_ratio(&forward, &reversed.join(" ")), 100);
    }

    #[test]
    fn matched_agrees_with_best_score(a in text(), threshold in 0i64..=100) {
        let vocabulary = Vocabulary::demographic();
        let threshold = Threshold::new(threshold).unwrap();
        for algorithm in Algorithm::ALL {
            let result = classify(&a, &vocabulary, algorithm, threshold);
            if a.trim().is_empty() {
                prop_assert!(!result.matched);
                prop_assert_eq!(result.best_score, 0);
                continue;
            }
            prop_assert_eq!(result.matched, result.best_score >= threshold.value());
            let expected_max = vocabulary
                .keywords()
                .map(|keyword| score(algorithm, a.trim(), keyword.as_str()))
                .max()
                .unwrap_or(0);
            prop_assert_eq!(result.best_score, expected_max);
        }
    }
}
