//! Pure core integration functions.
//!
//! Chains the grid stages into one recomputation pass. A pass is a pure
//! function of `(items, container)` plus the derivation formulas, so identical
//! inputs always produce identical frames.

use crate::geometry::ContainerData;
use crate::grid::{derive_config, pack, plan, window, Derivers, GridConfig, GridLayout};
use crate::grid::{RenderPlan, RenderWindow};
use crate::model::Item;
use tracing::debug;

/// Output of one recomputation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Derived configuration.
    pub config: GridConfig,
    /// Packed cells.
    pub layout: GridLayout,
    /// Cells selected for rendering.
    pub window: RenderWindow,
    /// Placements for the renderer.
    pub plan: RenderPlan,
}

/// Run the full pipeline: derive -> pack -> window -> plan.
///
/// Missing inputs degrade to empty results; this never fails.
pub fn recompute(
    items: Option<&[Item]>,
    container: Option<&ContainerData>,
    derivers: &Derivers,
) -> Frame {
    let config = derive_config(container, items, derivers);
    let layout = pack(&config);
    let window = match container {
        Some(container) => window(&config, container, &layout),
        None => RenderWindow::empty(),
    };
    let plan = plan(&layout, &window);

    debug!(
        cells = layout.cells.len(),
        rendered = window.cells.len(),
        total_height = layout.total_height,
        first_row = ?window.first_row,
        "Recomputed frame"
    );

    Frame {
        config,
        layout,
        window,
        plan,
    }
}

/// Memoizes [`recompute`] by comparing the previous inputs by value.
#[derive(Debug, Default)]
pub struct FrameCache {
    last: Option<CachedFrame>,
}

#[derive(Debug)]
struct CachedFrame {
    items: Option<Vec<Item>>,
    container: Option<ContainerData>,
    frame: Frame,
}

impl FrameCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the frame for these inputs, recomputing only if they changed.
    ///
    /// The derivers are assumed stable for the lifetime of the cache; call
    /// [`FrameCache::invalidate`] after swapping them.
    pub fn get(
        &mut self,
        items: Option<&[Item]>,
        container: Option<&ContainerData>,
        derivers: &Derivers,
    ) -> &Frame {
        let hit = self.last.as_ref().is_some_and(|cached| {
            cached.items.as_deref() == items && cached.container.as_ref() == container
        });

        if !hit {
            self.last = None;
        }

        let cached = self.last.get_or_insert_with(|| CachedFrame {
            items: items.map(<[Item]>::to_vec),
            container: container.copied(),
            frame: recompute(items, container, derivers),
        });
        &cached.frame
    }

    /// Drop the cached frame.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Check whether a frame is cached.
    pub fn is_populated(&self) -> bool {
        self.last.is_some()
    }
}
