//! Render plan: the geometry handed to the rendering collaborator.
//!
//! Rows are renumbered relative to the first rendered row so the renderer can
//! lay visible cells out in a fresh grid, pushed down by `top_padding` so the
//! skipped leading rows keep their share of the scroll height.

use super::pack::GridLayout;
use super::window::RenderWindow;
use crate::model::ItemId;
use serde::Serialize;
use std::fmt;

/// Placement of one visible cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellPlacement {
    /// Item rendered in this cell.
    pub id: ItemId,
    /// 1-based start column.
    pub column_start: usize,
    /// Exclusive end column.
    pub column_end: usize,
    /// 1-based row, relative to the first rendered row.
    pub row_start: usize,
    /// Height in px.
    pub height: f64,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderPlan {
    /// Full content height in px.
    pub total_height: f64,
    /// Offset of the first rendered row in px.
    pub top_padding: f64,
    /// Visible cells in packing order.
    pub cells: Vec<CellPlacement>,
}

/// Build the render plan for a layout and its window.
pub fn plan(layout: &GridLayout, window: &RenderWindow) -> RenderPlan {
    let first_row = window.first_row.unwrap_or(1);

    let cells = window
        .cells
        .iter()
        .map(|cell| CellPlacement {
            id: cell.entry.id.clone(),
            column_start: cell.column,
            column_end: cell.column_end(),
            row_start: cell.row.saturating_sub(first_row) + 1,
            height: cell.height,
        })
        .collect();

    RenderPlan {
        total_height: layout.total_height,
        top_padding: window.first_row_offset.unwrap_or(0.0),
        cells,
    }
}

impl fmt::Display for RenderPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "total_height={} top_padding={} cells={}",
            self.total_height,
            self.top_padding,
            self.cells.len()
        )?;
        for cell in &self.cells {
            writeln!(
                f,
                "{:<12} col {}..{} row {} h {}",
                cell.id.as_str(),
                cell.column_start,
                cell.column_end,
                cell.row_start,
                cell.height
            )?;
        }
        Ok(())
    }
}
