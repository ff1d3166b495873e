//! Property-based tests for the recomputation pipeline.
//!
//! Properties Under Test:
//! 1. Every windowed cell intersects the extended visible band
//! 2. Every packed cell outside the window lies wholly above or below it
//! 3. The window is a contiguous, order-preserving run of the layout
//! 4. Recomputing with identical inputs is idempotent
//! 5. Resolved ratio heights follow the occupied width

use crate::geometry::{ContainerData, ElementBox, Size};
use crate::grid::{Derivers, VisibleBand};
use crate::integration::recompute;
use crate::model::{Item, ItemId};
use proptest::prelude::*;

// ===== Arbitrary Strategies =====

/// An item with either a literal height or a natural size, and a span in -1..=5.
fn arb_item() -> impl Strategy<Value = Item> {
    (
        prop::option::of((50.0f64..2000.0, 50.0f64..2000.0)),
        10.0f64..600.0,
        -1i32..=5,
        prop::bool::weighted(0.1),
    )
        .prop_map(|(natural, height, span, new_row)| {
            let id = ItemId::new("item").expect("valid id");
            let mut item = Item::new(id, height).with_column_span(span);
            if let Some((width, height)) = natural {
                item = item.with_natural_size(width, height);
            }
            if new_row {
                item = item.with_new_row();
            }
            item
        })
}

/// Up to 80 items with unique ids.
fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(arb_item(), 0..80).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(index, mut item)| {
                item.id = ItemId::new(format!("item-{index}")).expect("valid id");
                item
            })
            .collect()
    })
}

fn arb_container() -> impl Strategy<Value = ContainerData> {
    (
        200.0f64..2400.0,
        200.0f64..1400.0,
        0.0f64..20_000.0,
        0.0f64..800.0,
    )
        .prop_map(|(width, height, scroll_top, offset)| {
            ContainerData::new(
                Size::new(width, height),
                scroll_top,
                ElementBox::new(offset, Size::new(width, 0.0)),
            )
        })
}

// ===== Properties =====

proptest! {
    #[test]
    fn windowed_cells_intersect_the_band(items in arb_items(), data in arb_container()) {
        let frame = recompute(Some(items.as_slice()), Some(&data), &Derivers::default());
        let band = VisibleBand::new(&data, frame.config.window_margin);
        let offset = data.element.map_or(0.0, |e| e.offset_top);

        for cell in &frame.window.cells {
            let top = offset + cell.offset;
            prop_assert!(band.intersects(top, top + cell.height));
        }
    }

    #[test]
    fn culled_cells_lie_outside_the_band(items in arb_items(), data in arb_container()) {
        let frame = recompute(Some(items.as_slice()), Some(&data), &Derivers::default());
        let band = VisibleBand::new(&data, frame.config.window_margin);
        let offset = data.element.map_or(0.0, |e| e.offset_top);
        let rendered: Vec<&ItemId> = frame.window.cells.iter().map(|c| &c.entry.id).collect();

        for cell in &frame.layout.cells {
            if rendered.contains(&&cell.entry.id) {
                continue;
            }
            let top = offset + cell.offset;
            let bottom = top + cell.height;
            prop_assert!(bottom < band.top || top > band.bottom);
        }
    }

    #[test]
    fn window_is_an_ordered_subsequence(items in arb_items(), data in arb_container()) {
        let frame = recompute(Some(items.as_slice()), Some(&data), &Derivers::default());
        let mut layout = frame.layout.cells.iter();

        for cell in &frame.window.cells {
            prop_assert!(layout.any(|candidate| candidate == cell));
        }
        if let Some(first) = frame.window.cells.first() {
            prop_assert_eq!(frame.window.first_row, Some(first.row));
            prop_assert_eq!(frame.plan.cells[0].row_start, 1);
        }
    }

    #[test]
    fn recompute_is_idempotent(items in arb_items(), data in arb_container()) {
        let derivers = Derivers::default();
        let first = recompute(Some(items.as_slice()), Some(&data), &derivers);
        let second = recompute(Some(items.as_slice()), Some(&data), &derivers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ratio_heights_follow_occupied_width(items in arb_items(), data in arb_container()) {
        let frame = recompute(Some(items.as_slice()), Some(&data), &Derivers::default());
        let column_width = frame.config.column_width.unwrap_or(0.0);

        for (source, entry) in items.iter().zip(&frame.config.entries) {
            if let Some(natural_width) = source.width {
                let span = source.resolved_span(frame.config.column_count) as f64;
                let occupied = column_width * span + frame.config.gap * (span - 1.0);
                prop_assert_eq!(entry.width, Some(occupied));
                prop_assert_eq!(entry.height, (occupied * source.height / natural_width).round());
            } else {
                prop_assert_eq!(entry, source);
            }
        }
    }
}
