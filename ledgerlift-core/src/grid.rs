//! Untyped string tables, as returned by document services that already
//! recognize table structure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, padding with empty cells or truncating to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.width(), String::new());
        self.rows.push(row);
    }

    /// Value of `column` in row `row`, if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut grid = Grid::new(vec!["Date".into(), "Amount".into()]);
        grid.push_row(vec!["2024-01-15".into()]);
        grid.push_row(vec!["2024-01-16".into(), "5.00".into(), "extra".into()]);

        assert_eq!(grid.rows[0], vec!["2024-01-15", ""]);
        assert_eq!(grid.rows[1], vec!["2024-01-16", "5.00"]);
        assert_eq!(grid.cell(1, "Amount"), Some("5.00"));
        assert_eq!(grid.cell(1, "Balance"), None);
    }
}
