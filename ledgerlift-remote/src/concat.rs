//! Stack several grids into one export table.

use ledgerlift_core::Grid;
use std::collections::HashMap;

/// Concatenate `grids` top to bottom.
///
/// Columns are the union of all headers in first-seen order; each table's
/// cells land under their own column name and are empty elsewhere. A blank
/// row separates consecutive tables.
pub fn concat_grids(grids: Vec<Grid>) -> Grid {
    let mut headers: Vec<String> = Vec::new();
    for grid in &grids {
        for h in &grid.headers {
            if !headers.contains(h) {
                headers.push(h.clone());
            }
        }
    }

    let index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.clone(), i))
        .collect();

    let mut out = Grid::new(headers);
    let width = out.width();
    let count = grids.len();

    for (i, grid) in grids.into_iter().enumerate() {
        let positions: Vec<usize> = grid
            .headers
            .iter()
            .filter_map(|h| index.get(h).copied())
            .collect();

        for row in grid.rows {
            let mut placed = vec![String::new(); width];
            for (cell, &pos) in row.into_iter().zip(&positions) {
                placed[pos] = cell;
            }
            out.rows.push(placed);
        }

        if i + 1 < count {
            out.rows.push(vec![String::new(); width]);
        }
    }

    out
}
