//! Error taxonomy shared by the classification crates.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DemogError {
    /// A run parameter is outside its contract (threshold range, algorithm name, field name).
    #[error("invalid configuration for {parameter}: {message}")]
    InvalidConfiguration { parameter: String, message: String },

    /// The text and/or group field is absent from one or more records.
    #[error("{}", describe_missing(.missing))]
    MissingField { missing: Vec<MissingColumn> },

    /// A keyword normalized to the empty string.
    #[error("keyword is empty after normalization")]
    EmptyKeyword,

    /// Batch stopped by a cancellation flag between chunks.
    #[error("classification cancelled after {processed} record(s)")]
    Cancelled { processed: usize },
}

/// Records lacking one required field, by batch index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn {
    pub field: String,
    pub indices: Vec<usize>,
}

impl MissingColumn {
    pub fn new(field: impl Into<String>, indices: Vec<usize>) -> Self {
        Self {
            field: field.into(),
            indices,
        }
    }
}

impl DemogError {
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Every record index named by a [`DemogError::MissingField`], ascending and
    /// without repeats. Empty for other variants.
    pub fn missing_indices(&self) -> Vec<usize> {
        let Self::MissingField { missing } = self else {
            return Vec::new();
        };
        let mut indices: Vec<usize> = missing
            .iter()
            .flat_map(|column| column.indices.iter().copied())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

fn describe_missing(missing: &[MissingColumn]) -> String {
    missing
        .iter()
        .map(|column| {
            format!(
                "field '{}' is missing from {} record(s) at indices {:?}",
                column.field,
                column.indices.len(),
                column.indices
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, DemogError>;
