//! String similarity primitives.
//!
//! All functions expect text that is already lowercased and trimmed and
//! return an integer percentage in `0..=100`. Scores reproduce the
//! FuzzyWuzzy measures: the base ratio is the InDel similarity
//! `(len(a) + len(b) - d) / (len(a) + len(b))`, scaled to a percentage and
//! rounded half to even. Lengths count Unicode scalar values.

use std::collections::BTreeSet;

use demog_model::Algorithm;
use rapidfuzz::distance::indel;

/// Scores `a` against `b` with the given algorithm.
pub fn score(algorithm: Algorithm, a: &str, b: &str) -> u8 {
    match algorithm {
        Algorithm::Ratio => ratio(a, b),
        Algorithm::PartialRatio => partial_ratio(a, b),
        Algorithm::TokenSortRatio => token_sort_ratio(a, b),
        Algorithm::TokenSetRatio => token_set_ratio(a, b),
    }
}

pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best ratio of the shorter string against every window of the longer one
/// with the same length. On equal lengths `a` is the shorter string.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100 } else { 0 };
    }

    let mut best = 0;
    for window in long.windows(short.len()) {
        let score = ratio_chars(&short, window);
        if score > best {
            best = score;
            if best == 100 {
                break;
            }
        }
    }
    best
}

pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let mut tokens_a = tokenize(a);
    let mut tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }
    tokens_a.sort_unstable();
    tokens_b.sort_unstable();
    ratio(&tokens_a.join(" "), &tokens_b.join(" "))
}

pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let set_a: BTreeSet<String> = tokenize(a).into_iter().collect();
    let set_b: BTreeSet<String> = tokenize(b).into_iter().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0;
    }

    let intersection = join_sorted(set_a.intersection(&set_b));
    let only_a = join_sorted(set_a.difference(&set_b));
    let only_b = join_sorted(set_b.difference(&set_a));

    let combined_a = join_nonempty(&intersection, &only_a);
    let combined_b = join_nonempty(&intersection, &only_b);

    ratio(&intersection, &combined_a)
        .max(ratio(&intersection, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Splits on runs of non-alphanumeric characters, dropping empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    let lensum = a.len() + b.len();
    if lensum == 0 {
        return 100;
    }
    let distance = indel::distance(a.iter().copied(), b.iter().copied());
    percent(lensum - distance, lensum)
}

/// `round(100 * similar / lensum)` with the float rounding of the reference
/// implementation (ties to even).
fn percent(similar: usize, lensum: usize) -> u8 {
    let ratio = similar as f64 / lensum as f64;
    (100.0 * ratio).round_ties_even().clamp(0.0, 100.0) as u8
}

// BTreeSet iteration is already sorted.
fn join_sorted<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (false, true) => head.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identity() {
        assert_eq!(ratio("gender", "gender"), 100);
        assert_eq!(ratio("", ""), 100);
    }

    #[test]
    fn test_ratio_one_empty() {
        assert_eq!(ratio("age", ""), 0);
        assert_eq!(ratio("", "age"), 0);
    }

    #[test]
    fn test_ratio_golden_vectors() {
        assert_eq!(ratio("this is a test", "this is a test!"), 97);
        assert_eq!(ratio("fuzzy wuzzy was a bear", "wuzzy fuzzy was a bear"), 91);
        assert_eq!(ratio("kitten", "sitting"), 62);
    }

    #[test]
    fn test_ratio_rounds_half_to_even() {
        // lensum 16, common subsequence 5: exactly 62.5
        assert_eq!(ratio("abcdexyz", "abcdeqrs"), 62);
        // lensum 16, common subsequence 7: exactly 87.5
        assert_eq!(ratio("abcdefgx", "abcdefgy"), 88);
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        assert_eq!(ratio("âge", "âge"), 100);
        assert_eq!(ratio("âge", "age"), 67);
    }

    #[test]
    fn test_partial_ratio_substring() {
        assert_eq!(
            partial_ratio("demographic information about patient gender", "demographic"),
            100
        );
        assert_eq!(partial_ratio("patient age at time of diagnosis", "age"), 100);
        assert_eq!(partial_ratio("this is a test", "this is a test!"), 100);
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(partial_ratio("", ""), 100);
        assert_eq!(partial_ratio("", "age"), 0);
        assert_eq!(partial_ratio("age", ""), 0);
    }

    #[test]
    fn test_partial_ratio_best_window() {
        // best window of "genders" for "gendre" shares "gend" + one of "r"/"e"
        assert_eq!(partial_ratio("gendre", "genders"), 83);
    }

    #[test]
    fn test_token_sort_order_invariance() {
        assert_eq!(token_sort_ratio("age gender", "gender age"), 100);
        assert_eq!(
            token_sort_ratio("fuzzy wuzzy was a bear", "wuzzy fuzzy was a bear"),
            100
        );
    }

    #[test]
    fn test_token_set_duplicate_invariance() {
        assert_eq!(token_set_ratio("race race ethnicity", "race ethnicity"), 100);
        assert_eq!(token_set_ratio("fuzzy was a bear", "fuzzy fuzzy was a bear"), 100);
    }

    #[test]
    fn test_token_set_subset_scores_full() {
        assert_eq!(token_set_ratio("patient gender code", "gender"), 100);
    }

    #[test]
    fn test_token_algorithms_need_tokens() {
        assert_eq!(token_sort_ratio("---", "age"), 0);
        assert_eq!(token_set_ratio("age", "!!"), 0);
        assert_eq!(token_set_ratio("--", "!!"), 0);
    }

    #[test]
    fn test_tokenize_splits_on_separators() {
        assert_eq!(
            tokenize("marital_status/code-2"),
            vec!["marital", "status", "code", "2"]
        );
        assert!(tokenize("  --  ").is_empty());
    }

    #[test]
    fn test_score_dispatch() {
        assert_eq!(score(Algorithm::Ratio, "age", "age"), 100);
        assert_eq!(score(Algorithm::PartialRatio, "patient age", "age"), 100);
        assert_eq!(score(Algorithm::TokenSortRatio, "b a", "a b"), 100);
        assert_eq!(score(Algorithm::TokenSetRatio, "a a b", "b a"), 100);
    }
}
