//! Viewport windowing: selects the cells that must be materialized.
//!
//! A cell is kept when its absolute vertical extent intersects the visible
//! band extended by the window margin on both sides. The output is a filter
//! over packing order, never a re-sort.

use super::derive::GridConfig;
use super::pack::{Cell, GridLayout};
use crate::geometry::ContainerData;
use serde::Serialize;

/// Cells to render for the current scroll position.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderWindow {
    /// Included cells, in packing order.
    pub cells: Vec<Cell>,
    /// Row number of the first included cell.
    pub first_row: Option<usize>,
    /// Smallest offset among included cells of `first_row`.
    pub first_row_offset: Option<f64>,
}

impl RenderWindow {
    /// Nothing to render.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if no cell is rendered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Extended visible band `[top, bottom]` in absolute px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleBand {
    /// Upper edge (`scroll_top - margin`).
    pub top: f64,
    /// Lower edge (`scroll_top + container height + margin`).
    pub bottom: f64,
}

impl VisibleBand {
    /// Band for a snapshot and margin.
    pub fn new(container: &ContainerData, window_margin: f64) -> Self {
        Self {
            top: container.scroll_top - window_margin,
            bottom: container.visible_bottom() + window_margin,
        }
    }

    /// Whether `[top, bottom]` touches the band. Edge contact counts as inside.
    pub fn intersects(&self, top: f64, bottom: f64) -> bool {
        !(bottom < self.top || top > self.bottom)
    }
}

/// Select the cells intersecting the extended visible band.
///
/// Returns [`RenderWindow::empty`] while the tracked element is detached.
pub fn window(config: &GridConfig, container: &ContainerData, layout: &GridLayout) -> RenderWindow {
    let Some(element_offset) = container.element_offset() else {
        return RenderWindow::empty();
    };

    let band = VisibleBand::new(container, config.window_margin);

    let mut cells = Vec::new();
    let mut first_row = None;
    let mut first_row_offset: Option<f64> = None;

    for cell in &layout.cells {
        let top = element_offset + cell.offset;
        let bottom = top + cell.height;
        if !band.intersects(top, bottom) {
            continue;
        }

        let row = *first_row.get_or_insert(cell.row);
        if cell.row == row {
            first_row_offset = Some(first_row_offset.map_or(cell.offset, |o| o.min(cell.offset)));
        }
        cells.push(cell.clone());
    }

    RenderWindow {
        cells,
        first_row,
        first_row_offset,
    }
}
