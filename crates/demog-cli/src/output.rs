//! Annotated CSV output: original columns followed by match metadata.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use demog_match::ClassifiedRecord;
use demog_model::CellValue;
use tracing::info;

pub const ANNOTATION_COLUMNS: [&str; 3] = ["matched", "matched_keyword", "match_score"];

/// Writes rows with every column in `columns` order, then the annotations.
///
/// Returns the number of data rows written.
pub fn write_annotated<'a, W, I>(writer: W, columns: &[String], rows: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ClassifiedRecord>,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(
            columns
                .iter()
                .map(String::as_str)
                .chain(ANNOTATION_COLUMNS),
        )
        .context("write header")?;

    let mut written = 0;
    for entry in rows {
        let mut row: Vec<String> = columns
            .iter()
            .map(|column| {
                entry
                    .record
                    .get(column)
                    .and_then(CellValue::as_text)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        row.push(entry.result.matched.to_string());
        row.push(entry.result.keyword_str().to_string());
        row.push(entry.result.best_score.to_string());
        writer
            .write_record(&row)
            .with_context(|| format!("write row {}", entry.index))?;
        written += 1;
    }
    writer.flush().context("flush output")?;
    Ok(written)
}

pub fn write_annotated_file<'a, I>(path: &Path, columns: &[String], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a ClassifiedRecord>,
{
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let written = write_annotated(file, columns, rows)?;
    info!(path = %path.display(), rows = written, "wrote annotated rows");
    Ok(written)
}
