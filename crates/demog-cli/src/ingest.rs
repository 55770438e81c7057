//! CSV loading into metadata records.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use demog_model::{CellValue, Record, Vocabulary};
use tracing::{info, warn};

/// Records loaded from one CSV file, with the header order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

pub fn read_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let dataset = read_csv_from(file).with_context(|| format!("read {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = dataset.records.len(),
        columns = dataset.columns.len(),
        "loaded metadata"
    );
    Ok(dataset)
}

/// Parses CSV with a header row. Empty cells become [`CellValue::Missing`].
pub fn read_csv_from<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("read header row")?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        bail!("CSV has no header row");
    }
    if let Some(empty) = headers.iter().position(|name| name.is_empty()) {
        bail!("column {} has an empty name", empty + 1);
    }
    let columns = dedupe_columns(headers);

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("parse data row {}", line + 1))?;
        let record = Record::from_pairs(columns.iter().zip(row.iter()).map(|(name, value)| {
            let cell = if value.is_empty() {
                CellValue::Missing
            } else {
                CellValue::text(value)
            };
            (name.clone(), cell)
        }));
        records.push(record);
    }

    Ok(Dataset { columns, records })
}

/// Renames repeated header names to `name.1`, `name.2`, ... so every column
/// keeps its own values. Generated names skip any name already in the header.
fn dedupe_columns(headers: Vec<String>) -> Vec<String> {
    let reserved: HashSet<String> = headers.iter().cloned().collect();
    let mut used: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut columns = Vec::with_capacity(headers.len());
    for name in headers {
        let mut unique = name.clone();
        let mut suffix = 1;
        while used.contains(&unique) || (unique != name && reserved.contains(&unique)) {
            unique = format!("{name}.{suffix}");
            suffix += 1;
        }
        if unique != name {
            warn!(column = %name, renamed = %unique, "duplicate column name");
        }
        used.insert(unique.clone());
        columns.push(unique);
    }
    columns
}

/// Loads a custom vocabulary, one keyword per line.
pub fn read_keywords(path: &Path) -> Result<Vocabulary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read keywords from {}", path.display()))?;
    let vocabulary = Vocabulary::from_terms(text.lines());
    if vocabulary.is_empty() {
        warn!(path = %path.display(), "keyword file contains no keywords");
    }
    Ok(vocabulary)
}
