//! Property-based tests for packing invariants.
//!
//! Tests validate:
//! 1. No cell overflows the grid after clipping
//! 2. Rows never decrease in input order; offsets never decrease with rows
//! 3. Total height is the last row's offset plus its tallest cell
//! 4. A single row's total height does not depend on the gap
//! 5. Item ids reject the empty string

use masonry_grid::grid::{pack, GridConfig};
use masonry_grid::model::{Item, ItemId};
use proptest::prelude::*;

// ===== Arbitrary Strategies =====

fn arb_entries() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((1.0f64..800.0, -2i32..=8, prop::bool::weighted(0.15)), 0..120)
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (height, span, new_row))| {
                    let item = Item::new(ItemId::new(format!("e{i}")).expect("valid id"), height)
                        .with_column_span(span);
                    if new_row {
                        item.with_new_row()
                    } else {
                        item
                    }
                })
                .collect()
        })
}

fn config(column_count: usize, gap: f64, entries: Vec<Item>) -> GridConfig {
    GridConfig {
        window_margin: 0.0,
        gap,
        column_count,
        column_width: None,
        entries,
    }
}

// ===== Property 1: Packing Validity =====

proptest! {
    #[test]
    fn cells_stay_inside_the_grid(
        entries in arb_entries(),
        column_count in 1usize..=8,
        gap in 0.0f64..40.0,
    ) {
        let layout = pack(&config(column_count, gap, entries));

        for cell in &layout.cells {
            prop_assert!(cell.column >= 1 && cell.column <= column_count);
            prop_assert!(cell.column_span >= 1);
            prop_assert!(cell.column + cell.column_span - 1 <= column_count);
        }
    }

    #[test]
    fn forced_rows_start_at_column_one(
        entries in arb_entries(),
        column_count in 1usize..=8,
    ) {
        let layout = pack(&config(column_count, 10.0, entries));

        for cell in layout.cells.iter().filter(|cell| cell.entry.new_row) {
            prop_assert_eq!(cell.column, 1);
        }
    }
}

// ===== Property 2: Row Monotonicity =====

proptest! {
    #[test]
    fn rows_and_offsets_are_monotonic(
        entries in arb_entries(),
        column_count in 1usize..=8,
        gap in 0.0f64..40.0,
    ) {
        let layout = pack(&config(column_count, gap, entries));

        for pair in layout.cells.windows(2) {
            prop_assert!(pair[0].row <= pair[1].row);
            prop_assert!(pair[0].offset <= pair[1].offset);
            if pair[0].row == pair[1].row {
                prop_assert_eq!(pair[0].offset, pair[1].offset);
            }
        }
    }
}

// ===== Property 3: Total Height =====

proptest! {
    #[test]
    fn total_height_is_last_row_offset_plus_tallest_cell(
        entries in arb_entries(),
        column_count in 1usize..=8,
        gap in 0.0f64..40.0,
    ) {
        let layout = pack(&config(column_count, gap, entries));

        match layout.cells.last() {
            None => prop_assert_eq!(layout.total_height, 0.0),
            Some(last) => {
                let tallest = layout
                    .cells
                    .iter()
                    .filter(|cell| cell.row == last.row)
                    .map(|cell| cell.height)
                    .fold(0.0_f64, f64::max);
                prop_assert_eq!(layout.total_height, last.offset + tallest);
            }
        }
    }

    #[test]
    fn single_row_height_ignores_gap(
        heights in prop::collection::vec(1.0f64..800.0, 1..=6),
        gap_a in 0.0f64..40.0,
        gap_b in 0.0f64..40.0,
    ) {
        let entries: Vec<Item> = heights
            .iter()
            .enumerate()
            .map(|(i, h)| Item::new(ItemId::new(format!("e{i}")).expect("valid id"), *h))
            .collect();

        let a = pack(&config(6, gap_a, entries.clone()));
        let b = pack(&config(6, gap_b, entries));

        prop_assert_eq!(a.row_count(), 1);
        prop_assert_eq!(a.total_height, b.total_height);
    }
}

// ===== Property 4: Identifier Constructors =====

proptest! {
    #[test]
    fn item_id_accepts_non_empty_string(s in any::<String>()) {
        prop_assert_eq!(ItemId::new(&s).is_ok(), !s.is_empty());
    }
}
