//! Per-run configuration for the classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::{DemogError, Result};

pub const DEFAULT_THRESHOLD: u8 = 80;
pub const DEFAULT_TEXT_FIELD: &str = "attr_description";
pub const DEFAULT_GROUP_FIELD: &str = "table_name";

/// Minimum best score, inclusive, for a record to count as matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub fn new(value: i64) -> Result<Self> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DemogError::invalid_config(
                "threshold",
                format!("{value} is outside 0..=100"),
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_met_by(&self, score: u8) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = DemogError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub algorithm: Algorithm,
    pub threshold: Threshold,
    /// Field whose text is scored against the vocabulary.
    pub text_field: String,
    /// Field used to group statistics (usually the table name).
    pub group_field: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            threshold: Threshold::default(),
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            group_field: DEFAULT_GROUP_FIELD.to_string(),
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
        self.text_field = field.into();
        self
    }

    #[must_use]
    pub fn with_group_field(mut self, field: impl Into<String>) -> Self {
        self.group_field = field.into();
        self
    }

    /// Checks the field names; threshold and algorithm are valid by construction.
    pub fn validate(&self) -> Result<()> {
        if self.text_field.trim().is_empty() {
            return Err(DemogError::invalid_config(
                "text_field",
                "field name must not be empty",
            ));
        }
        if self.group_field.trim().is_empty() {
            return Err(DemogError::invalid_config(
                "group_field",
                "field name must not be empty",
            ));
        }
        Ok(())
    }
}
