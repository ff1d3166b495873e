//! Grid packing: assigns every entry a column, a row and a vertical offset.
//!
//! Single deterministic forward pass, left-to-right then top-to-bottom. A
//! running "column shift" is added to each entry's input index to account for
//! reserved span columns and padded-out rows, so the shifted index maps
//! directly to a grid slot.
//!
//! # Overflow
//! An entry whose span would run past the last column is clipped: its span is
//! reduced to fit and its height scaled by the fraction kept. The shift then
//! reserves only the clipped span.

use super::derive::GridConfig;
use crate::model::Item;
use serde::Serialize;

/// A packed entry.
///
/// Created fresh on every pass and never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// The normalized entry this cell was packed from.
    pub entry: Item,
    /// 1-based column of the cell's left edge.
    pub column: usize,
    /// 1-based row.
    pub row: usize,
    /// Pixels from the content top to the top of the cell's row.
    pub offset: f64,
    /// Rendered height after rounding and overflow scaling.
    pub height: f64,
    /// Columns occupied after overflow clipping.
    pub column_span: usize,
}

impl Cell {
    /// Exclusive end column (`column + column_span`).
    pub fn column_end(&self) -> usize {
        self.column + self.column_span
    }

    /// Bottom edge relative to the content top.
    pub fn bottom(&self) -> f64 {
        self.offset + self.height
    }
}

/// Result of a packing pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridLayout {
    /// Cells in input order.
    pub cells: Vec<Cell>,
    /// Full content height; the last row is not gap-padded.
    pub total_height: f64,
}

impl GridLayout {
    /// Number of rows in the layout.
    pub fn row_count(&self) -> usize {
        self.cells.last().map_or(0, |cell| cell.row)
    }
}

/// Pack the config's entries into the grid.
pub fn pack(config: &GridConfig) -> GridLayout {
    let column_count = config.column_count.max(1);

    let mut current_row = 1;
    let mut accumulated = 0.0;
    let mut row_max = 0.0_f64;
    let mut column_shift = 0;

    let mut cells = Vec::with_capacity(config.entries.len());

    for (index, entry) in config.entries.iter().enumerate() {
        let mut column_span = entry.resolved_span(column_count);

        let distance_to_row_start = (index + column_shift) % column_count;
        if entry.new_row && distance_to_row_start != 0 {
            column_shift += column_count - distance_to_row_start;
        }

        let shifted = index + column_shift;
        let column = shifted % column_count + 1;
        let row = shifted / column_count + 1;

        let mut height = entry.height;
        if column + column_span > column_count + 1 {
            let overlap = column + column_span - column_count - 1;
            height *= 1.0 - overlap as f64 / column_span as f64;
            column_span -= overlap;
        }

        if column_span > 1 {
            column_shift += column_span - 1;
        }

        if row != current_row {
            accumulated += row_max + config.gap;
            row_max = 0.0;
            current_row = row;
        }

        let height = height.round();
        row_max = row_max.max(height);

        cells.push(Cell {
            entry: entry.clone(),
            column,
            row,
            offset: accumulated,
            height,
            column_span,
        });
    }

    GridLayout {
        cells,
        total_height: accumulated + row_max,
    }
}
