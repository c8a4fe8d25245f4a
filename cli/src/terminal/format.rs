use colored::*;
use dnscover_core::RecordRow;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::terminal::colors;

/// Uncovered share, red when anything is uncovered.
pub fn percent(value: f64) -> ColoredString {
    let text = format!("{value:.2}%");
    if value > 0.0 {
        text.color(colors::NOT_COVERED).bold()
    } else {
        text.color(colors::COVERED).bold()
    }
}

pub fn count(value: usize) -> ColoredString {
    value.to_string().color(colors::ACCENT)
}

/// Renders the record table with the given column titles.
pub fn records_table(columns: &[String], rows: &[RecordRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for row in rows {
        builder.push_record(row.cells().map(str::to_string));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
