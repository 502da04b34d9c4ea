//! HTML `<table>` → [`Grid`].
//!
//! Each `<tr>` becomes a row of its direct `<td>`/`<th>` cells (trimmed
//! text). The first non-empty row is the header; later rows are padded or
//! truncated to its width.

use ledgerlift_core::Grid;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use crate::error::RemoteError;

pub struct HtmlTableParser {
    row: Selector,
}

/// Suffix repeated header names (`Amount`, `Amount.1`, ...) so columns
/// stay addressable by name.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|h| {
            let count = seen.entry(h.clone()).or_insert(0);
            let name = if *count == 0 {
                h
            } else {
                format!("{h}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

impl HtmlTableParser {
    pub fn new() -> Result<Self, RemoteError> {
        let row = Selector::parse("tr")
            .map_err(|e| RemoteError::Selector(format!("'tr': {e:?}")))?;
        Ok(Self { row })
    }

    /// Parse one table. `None` if it has no rows with cells.
    pub fn parse(&self, html: &str) -> Option<Grid> {
        let fragment = Html::parse_fragment(html);
        let mut rows = fragment
            .select(&self.row)
            .map(row_cells)
            .filter(|cells| !cells.is_empty());

        let mut grid = Grid::new(dedupe_headers(rows.next()?));
        for cells in rows {
            grid.push_row(cells);
        }
        Some(grid)
    }
}
