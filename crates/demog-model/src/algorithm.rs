use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DemogError;

/// Approximate string similarity measure used to score text against keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Whole-string similarity from the InDel edit distance.
    #[default]
    Ratio,
    /// Best [`Algorithm::Ratio`] of the shorter string against any equal-length window of the longer.
    PartialRatio,
    /// Ratio after sorting tokens alphabetically.
    TokenSortRatio,
    /// Ratio over shared and unique token sets.
    TokenSetRatio,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Self::Ratio,
        Self::PartialRatio,
        Self::TokenSortRatio,
        Self::TokenSetRatio,
    ];

    /// Configuration name (`partial_ratio`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ratio => "ratio",
            Self::PartialRatio => "partial_ratio",
            Self::TokenSortRatio => "token_sort_ratio",
            Self::TokenSetRatio => "token_set_ratio",
        }
    }

    /// Report name (`Partial Ratio`).
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ratio => "Ratio",
            Self::PartialRatio => "Partial Ratio",
            Self::TokenSortRatio => "Token Sort Ratio",
            Self::TokenSetRatio => "Token Set Ratio",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ratio => "overall similarity between the two strings",
            Self::PartialRatio => "best partial match, useful for substring matching",
            Self::TokenSortRatio => "sorts tokens alphabetically before comparison, ignoring word order",
            Self::TokenSetRatio => "compares unique tokens, ignoring duplicates and order",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = DemogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == key)
            .ok_or_else(|| {
                DemogError::invalid_config(
                    "algorithm",
                    format!(
                        "unknown algorithm '{s}' (expected one of: ratio, partial_ratio, token_sort_ratio, token_set_ratio)"
                    ),
                )
            })
    }
}
