//! Plain-text grid rendering for terminals.

use filings_core::StatementRecord;

use crate::context::ExportContext;
use crate::table::{TableRow, tables};

/// Maximum width of the title border.
pub const TERMINAL_WIDTH: usize = 80;

/// Scale a value to K/M/B with two decimals (`1234567.0` is `1.23M`).
pub fn format_financial_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{value:.2}")
    }
}

/// Render one bordered title and grid per statement kind.
pub fn to_console(ctx: &ExportContext, records: &[StatementRecord]) -> String {
    let mut out = String::new();
    for table in tables(records) {
        let heading = ctx.heading(table.kind.title());
        let border = "=".repeat((heading.chars().count() + 4).min(TERMINAL_WIDTH));
        out.push_str(&format!("\n{border}\n  {heading}  \n{border}\n\n"));

        let mut header = vec!["Line item".to_string()];
        header.extend(table.periods.iter().map(|p| p.to_string()));

        let body: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| match row {
                TableRow::Section(title) => {
                    let mut cells = vec![format!("--- {title} ---")];
                    cells.resize(header.len(), String::new());
                    cells
                }
                TableRow::Item { label, values, .. } => std::iter::once(label.clone())
                    .chain(
                        values
                            .iter()
                            .map(|v| v.map(format_financial_number).unwrap_or_default()),
                    )
                    .collect(),
            })
            .collect();

        out.push_str(&grid(&header, &body));
    }
    out
}

fn grid(header: &[String], body: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(header)
                .chain(body.iter().map(Vec::as_slice))
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |fill: char| {
        let mut line = String::from("+");
        for width in &widths {
            line.extend(std::iter::repeat_n(fill, width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };
    let line = |cells: &[String]| {
        let mut line = String::from("|");
        for (col, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            // labels left, numbers right
            if col == 0 {
                line.push_str(&format!(" {cell:<width$} |"));
            } else {
                line.push_str(&format!(" {cell:>width$} |"));
            }
        }
        line.push('\n');
        line
    };

    let mut out = rule('-');
    out.push_str(&line(header));
    out.push_str(&rule('='));
    for row in body {
        out.push_str(&line(row));
        out.push_str(&rule('-'));
    }
    out
}
