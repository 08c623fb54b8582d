//! Text rendering for `--format table`

use std::fmt::Write as _;

use crate::executor::{PageLink, ResultPage};
use crate::schema::{Metric, StockRecord};

const TICKER_LABEL: &str = "Ticker";

/// Renders a result page as a fixed-width table followed by the summary line
pub fn render_page(page: &ResultPage) -> String {
    let mut header: Vec<String> = vec![TICKER_LABEL.to_string()];
    header.extend(Metric::ALL.iter().map(|m| m.label().to_string()));

    let rows: Vec<Vec<String>> = page.records.iter().map(row_cells).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    if rows.is_empty() {
        out.push_str("(no matching records)\n");
    }

    out.push('\n');
    out.push_str(&page.summary());
    out.push('\n');

    let pager = render_pager(page);
    if !pager.is_empty() {
        out.push_str(&pager);
        out.push('\n');
    }

    out
}

/// Pager line with `Previous`/`Next` where there is a page to move to:
/// `Previous  1 ... 5 [6] 7 ... 12  Next`
pub fn render_pager(page: &ResultPage) -> String {
    let mut parts = Vec::new();
    if page.has_previous() {
        parts.push("Previous".to_string());
    }

    let links = render_window(&page.window(), page.page);
    if !links.is_empty() {
        parts.push(links);
    }

    if page.has_next() {
        parts.push("Next".to_string());
    }
    parts.join("  ")
}

/// Page links, current page in brackets: `1 ... 5 [6] 7 ... 12`
pub fn render_window(links: &[PageLink], current: usize) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the alias listing: one line per field with its aliases
pub fn render_fields(listing: &[(&'static str, &'static str, Vec<&'static str>)]) -> String {
    let width = listing
        .iter()
        .map(|(field, _, _)| field.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (field, column, aliases) in listing {
        let _ = writeln!(
            out,
            "{:<width$}  {}  [{}]",
            field,
            aliases.join(", "),
            column,
            width = width
        );
    }
    out
}

fn row_cells(record: &StockRecord) -> Vec<String> {
    let mut cells = vec![record.ticker.clone()];
    cells.extend(
        Metric::ALL
            .iter()
            .map(|m| format!("{:.2}", record.metric(*m))),
    );
    cells
}

/// Ticker left-aligned, numbers right-aligned
fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            let _ = write!(line, "{:<width$}", cell, width = *width);
        } else {
            let _ = write!(line, "  {:>width$}", cell, width = *width);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
