//! Config derivation: geometry + items -> per-pass grid configuration.
//!
//! The four numeric formulas (column count, gap, window margin, ratio height)
//! are pluggable through [`Derivers`]. Each metric is either a computed
//! formula or a constant override.

use crate::geometry::ContainerData;
use crate::model::Item;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Reference column width in logical px used by the default column formula.
pub const REFERENCE_COLUMN_WIDTH: f64 = 250.0;

/// Gap used on wide, tall containers.
pub const WIDE_GAP: f64 = 10.0;

/// Gap used otherwise.
pub const NARROW_GAP: f64 = 5.0;

/// Formula over a geometry snapshot.
pub type MetricFn<T> = Arc<dyn Fn(&ContainerData) -> T + Send + Sync>;

/// Height formula: `(occupied_width, natural_width, natural_height) -> height`.
pub type RatioHeightFn = Arc<dyn Fn(f64, f64, f64) -> f64 + Send + Sync>;

/// A derivable metric: either a formula or a literal value.
#[derive(Clone)]
pub enum Metric<T> {
    /// Literal override, independent of geometry.
    Constant(T),
    /// Computed from the geometry snapshot.
    Computed(MetricFn<T>),
}

impl<T: Copy> Metric<T> {
    /// Wrap a formula.
    pub fn computed(f: impl Fn(&ContainerData) -> T + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Evaluate against a snapshot.
    pub fn eval(&self, container: &ContainerData) -> T {
        match self {
            Metric::Constant(value) => *value,
            Metric::Computed(f) => f(container),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Metric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Metric::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// The set of derivation formulas used by [`derive_config`].
#[derive(Clone)]
pub struct Derivers {
    /// Number of columns.
    pub column_count: Metric<usize>,
    /// Gap between cells, both axes.
    pub gap: Metric<f64>,
    /// Pre-render buffer around the visible band.
    pub window_margin: Metric<f64>,
    /// Aspect-ratio-preserving height.
    pub ratio_height: RatioHeightFn,
}

impl Default for Derivers {
    fn default() -> Self {
        Self {
            column_count: Metric::computed(default_column_count),
            gap: Metric::computed(default_gap),
            window_margin: Metric::computed(default_window_margin),
            ratio_height: Arc::new(default_ratio_height),
        }
    }
}

impl Derivers {
    /// Default column formula with a different reference column width.
    pub fn with_reference_column_width(mut self, reference: f64) -> Self {
        self.column_count = Metric::computed(move |c| column_count_for(c, reference));
        self
    }
}

impl fmt::Debug for Derivers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derivers")
            .field("column_count", &self.column_count)
            .field("gap", &self.gap)
            .field("window_margin", &self.window_margin)
            .finish_non_exhaustive()
    }
}

/// `floor(element_width / 250)`, at least 1.
pub fn default_column_count(container: &ContainerData) -> usize {
    column_count_for(container, REFERENCE_COLUMN_WIDTH)
}

fn column_count_for(container: &ContainerData, reference: f64) -> usize {
    match container.element_width() {
        Some(width) if reference > 0.0 => ((width / reference).floor() as usize).max(1),
        _ => 1,
    }
}

/// 10 px on containers wider than 720 and taller than 480, else 5 px.
pub fn default_gap(container: &ContainerData) -> f64 {
    match container.element_width() {
        Some(width) if width > 720.0 && container.container.height > 480.0 => WIDE_GAP,
        _ => NARROW_GAP,
    }
}

/// One and a half container heights.
pub fn default_window_margin(container: &ContainerData) -> f64 {
    (container.container.height * 1.5).round()
}

/// `round(occupied_width * natural_height / natural_width)`.
pub fn default_ratio_height(occupied_width: f64, natural_width: f64, natural_height: f64) -> f64 {
    (occupied_width * natural_height / natural_width).round()
}

/// Per-pass grid configuration.
///
/// # Invariants
/// - `column_count >= 1`
/// - `entries` preserves input order
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Pre-render buffer around the visible band, px.
    pub window_margin: f64,
    /// Gap between cells, px.
    pub gap: f64,
    /// Number of columns.
    pub column_count: usize,
    /// Width of a single column, if the element width is known.
    pub column_width: Option<f64>,
    /// Normalized items with resolved width/height.
    pub entries: Vec<Item>,
}

impl GridConfig {
    /// Single column, no gap, no margin, no entries.
    pub fn degenerate() -> Self {
        Self {
            window_margin: 0.0,
            gap: 0.0,
            column_count: 1,
            column_width: None,
            entries: Vec::new(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::degenerate()
    }
}

/// `round((element_width - (columns - 1) * gap) / columns)`.
///
/// Returns `None` when the tracked element is not attached.
pub fn column_width(container: &ContainerData, column_count: usize, gap: f64) -> Option<f64> {
    let width = container.element_width()?;
    let columns = column_count.max(1) as f64;
    Some(((width - (columns - 1.0) * gap) / columns).round())
}

/// Derive the grid configuration for one pass.
///
/// Missing geometry or a missing item list yields [`GridConfig::degenerate`].
pub fn derive_config(
    container: Option<&ContainerData>,
    items: Option<&[Item]>,
    derivers: &Derivers,
) -> GridConfig {
    let (Some(container), Some(items)) = (container, items) else {
        return GridConfig::degenerate();
    };

    let column_count = derivers.column_count.eval(container).max(1);
    let gap = derivers.gap.eval(container);
    let window_margin = derivers.window_margin.eval(container);
    let column_width = column_width(container, column_count, gap);

    let entries = items
        .iter()
        .map(|item| resolve_entry(item, column_count, column_width, gap, derivers))
        .collect();

    debug!(
        column_count,
        gap,
        window_margin,
        ?column_width,
        items = items.len(),
        "Derived grid config"
    );

    GridConfig {
        window_margin,
        gap,
        column_count,
        column_width,
        entries,
    }
}

fn resolve_entry(
    item: &Item,
    column_count: usize,
    column_width: Option<f64>,
    gap: f64,
    derivers: &Derivers,
) -> Item {
    let (Some(natural_width), Some(column_width)) = (item.width, column_width) else {
        return item.clone();
    };
    if natural_width <= 0.0 {
        return item.clone();
    }

    let span = item.resolved_span(column_count) as f64;
    let occupied = column_width * span + gap * (span - 1.0);

    let mut entry = item.clone();
    entry.height = (derivers.ratio_height)(occupied, natural_width, item.height);
    entry.width = Some(occupied);
    entry
}

#[cfg(test)]
#[path = "derive_tests.rs"]
mod tests;
