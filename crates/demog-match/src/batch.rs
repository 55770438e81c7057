//! Batch classification of metadata records.
//!
//! Records are classified independently and returned in input order with
//! every original field untouched. Structural problems (a text or group
//! field absent from some records) are reported once per batch before any
//! record is scored.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use demog_model::{
    Algorithm, CellValue, DemogError, MatchConfig, MatchResult, MissingColumn, Record, Result,
    Stats, Threshold, Vocabulary,
};
use rayon::prelude::*;
use tracing::{debug, info_span, trace, warn};

use crate::matcher::Matcher;
use crate::stats::StatsBuilder;

/// Default number of parts when splitting matched rows for export.
pub const DEFAULT_EXPORT_PARTS: usize = 20;

/// One input record with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    /// Position of the record in the input batch.
    pub index: usize,
    pub record: Record,
    pub result: MatchResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub records: Vec<ClassifiedRecord>,
    pub stats: Stats,
}

impl Classification {
    pub fn matched(&self) -> impl Iterator<Item = &ClassifiedRecord> {
        self.records.iter().filter(|entry| entry.result.matched)
    }

    pub fn into_matched(self) -> Vec<ClassifiedRecord> {
        self.records
            .into_iter()
            .filter(|entry| entry.result.matched)
            .collect()
    }

    /// Splits matched rows into at most `parts` contiguous chunks of equal size.
    pub fn matched_parts(&self, parts: usize) -> Vec<Vec<&ClassifiedRecord>> {
        let matched: Vec<&ClassifiedRecord> = self.matched().collect();
        part_ranges(matched.len(), parts)
            .into_iter()
            .map(|range| matched[range].to_vec())
            .collect()
    }
}

/// Contiguous ranges covering `0..total` with `ceil(total / parts)` items each.
pub fn part_ranges(total: usize, parts: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return Vec::new();
    }
    let per_part = total.div_ceil(parts.max(1));
    (0..total)
        .step_by(per_part)
        .map(|start| start..(start + per_part).min(total))
        .collect()
}

/// Classifies records against a vocabulary under one [`MatchConfig`].
///
/// # Example
///
/// ```ignore
/// use demog_match::BatchClassifier;
/// use demog_model::{MatchConfig, Vocabulary};
///
/// let classifier = BatchClassifier::new(MatchConfig::default(), Vocabulary::demographic())?;
/// let classification = classifier.classify(&records)?;
/// println!("{} of {} matched", classification.stats.matched, classification.stats.total);
/// ```
#[derive(Debug, Clone)]
pub struct BatchClassifier {
    config: MatchConfig,
    vocabulary: Vocabulary,
}

impl BatchClassifier {
    pub fn new(config: MatchConfig, vocabulary: Vocabulary) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, vocabulary })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.vocabulary, self.config.algorithm, self.config.threshold)
    }

    pub fn classify(&self, records: &[Record]) -> Result<Classification> {
        let _span = self.span(records.len()).entered();
        self.check_fields(records)?;
        let matcher = self.matcher();
        let classified = records
            .iter()
            .enumerate()
            .map(|(index, record)| self.classify_one(&matcher, index, record))
            .collect();
        Ok(self.finish(classified))
    }

    /// Same output as [`Self::classify`], scoring records on the rayon pool.
    pub fn classify_parallel(&self, records: &[Record]) -> Result<Classification> {
        let _span = self.span(records.len()).entered();
        self.check_fields(records)?;
        let matcher = self.matcher();
        let classified = records
            .par_iter()
            .enumerate()
            .map(|(index, record)| self.classify_one(&matcher, index, record))
            .collect();
        Ok(self.finish(classified))
    }

    /// Classifies in chunks, checking `cancel` before each chunk.
    pub fn classify_cancellable(
        &self,
        records: &[Record],
        chunk_size: usize,
        cancel: &AtomicBool,
    ) -> Result<Classification> {
        let _span = self.span(records.len()).entered();
        self.check_fields(records)?;
        let matcher = self.matcher();
        let mut classified = Vec::with_capacity(records.len());
        for (chunk_index, chunk) in records.chunks(chunk_size.max(1)).enumerate() {
            if cancel.load(Ordering::Relaxed) {
                warn!(processed = classified.len(), "classification cancelled");
                return Err(DemogError::Cancelled {
                    processed: classified.len(),
                });
            }
            let offset = chunk_index * chunk_size.max(1);
            classified.extend(
                chunk
                    .iter()
                    .enumerate()
                    .map(|(i, record)| self.classify_one(&matcher, offset + i, record)),
            );
        }
        Ok(self.finish(classified))
    }

    fn span(&self, records: usize) -> tracing::Span {
        info_span!(
            "classify_batch",
            algorithm = %self.config.algorithm,
            threshold = self.config.threshold.value(),
            records,
        )
    }

    fn check_fields(&self, records: &[Record]) -> Result<()> {
        let mut missing = Vec::new();
        for field in [&self.config.text_field, &self.config.group_field] {
            let indices: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, record)| !record.contains(field))
                .map(|(index, _)| index)
                .collect();
            if !indices.is_empty() {
                warn!(field = %field, missing = indices.len(), "required field absent");
                missing.push(MissingColumn::new(field.as_str(), indices));
            }
        }
        if !missing.is_empty() {
            return Err(DemogError::MissingField { missing });
        }
        debug!(
            vocabulary = self.vocabulary.len(),
            "record fields present, classifying"
        );
        Ok(())
    }

    fn classify_one(&self, matcher: &Matcher<'_>, index: usize, record: &Record) -> ClassifiedRecord {
        let text = record
            .get(&self.config.text_field)
            .and_then(CellValue::as_text);
        let result = matcher.classify(text);
        trace!(index, score = result.best_score, matched = result.matched);
        ClassifiedRecord {
            index,
            record: record.clone(),
            result,
        }
    }

    fn finish(&self, records: Vec<ClassifiedRecord>) -> Classification {
        let mut builder =
            StatsBuilder::new(&self.vocabulary, self.config.algorithm, self.config.threshold);
        for entry in &records {
            let group = entry
                .record
                .get(&self.config.group_field)
                .and_then(CellValue::as_text);
            builder.record(group, &entry.result);
        }
        let stats = builder.finish();
        debug!(
            total = stats.total,
            matched = stats.matched,
            "classification finished"
        );
        Classification { records, stats }
    }
}

/// Validates the raw threshold, then classifies every record.
///
/// Fails with [`DemogError::InvalidConfiguration`] before touching any record
/// when `threshold` is outside `0..=100` or a field name is blank.
pub fn classify_all(
    records: &[Record],
    text_field: &str,
    group_field: &str,
    vocabulary: &Vocabulary,
    algorithm: Algorithm,
    threshold: i64,
) -> Result<Classification> {
    let config = MatchConfig::default()
        .with_algorithm(algorithm)
        .with_threshold(Threshold::new(threshold)?)
        .with_text_field(text_field)
        .with_group_field(group_field);
    BatchClassifier::new(config, vocabulary.clone())?.classify(records)
}
