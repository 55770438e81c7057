use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use demog_model::{KeywordScore, ScoreHistogram, Stats, Threshold, Vocabulary};

pub fn print_summary(stats: &Stats) {
    println!(
        "Algorithm: {} | Threshold: {}",
        stats.algorithm.display_name(),
        stats.threshold
    );
    println!(
        "Matched {} of {} records ({:.1}%)",
        stats.matched,
        stats.total,
        stats.match_rate * 100.0
    );
    if let Some(summary) = &stats.score_summary {
        println!(
            "Best score: min {} / mean {:.1} / max {}",
            summary.min, summary.mean, summary.max
        );
    }
    println!("{}", group_table(stats));
    println!("{}", histogram_table(stats));
    if !stats.by_category.is_empty() {
        println!("{}", category_table(stats));
    }
}

/// Per-group matched/total counts with a total row.
pub fn group_table(stats: &Stats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Matched"),
        header_cell("Total"),
        header_cell("Rate"),
    ]);
    apply_summary_table_style(&mut table);
    for (group, counts) in &stats.groups {
        table.add_row(vec![
            Cell::new(group),
            count_cell(counts.matched),
            Cell::new(counts.total),
            Cell::new(format!("{:.1}%", counts.rate() * 100.0)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.matched).add_attribute(Attribute::Bold),
        Cell::new(stats.total).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", stats.match_rate * 100.0)).add_attribute(Attribute::Bold),
    ]);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

pub fn histogram_table(stats: &Stats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Best score"), header_cell("Records")]);
    apply_table_style(&mut table);
    for (bucket, count) in stats.histogram.buckets.iter().enumerate() {
        table.add_row(vec![
            Cell::new(ScoreHistogram::bucket_label(bucket)),
            if *count == 0 {
                dim_cell(count)
            } else {
                Cell::new(count)
            },
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn category_table(stats: &Stats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Matched")]);
    apply_table_style(&mut table);
    for (category, count) in &stats.by_category {
        table.add_row(vec![Cell::new(category.label()), Cell::new(count)]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn keywords_table(vocabulary: &Vocabulary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Keywords")]);
    apply_table_style(&mut table);
    for (category, keywords) in vocabulary.by_category() {
        let joined = keywords
            .iter()
            .map(|keyword| keyword.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![Cell::new(category.label()), Cell::new(joined)]);
    }
    table
}

/// Keyword scores for one text, marking those at or above the threshold.
pub fn explain_table(scores: &[KeywordScore], threshold: Threshold) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Keyword"),
        header_cell("Category"),
        header_cell("Score"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    for entry in scores {
        let matched = threshold.is_met_by(entry.score);
        table.add_row(vec![
            Cell::new(entry.keyword.as_str()),
            dim_cell(entry.category.label()),
            Cell::new(entry.score),
            if matched {
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            },
        ]);
    }
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
