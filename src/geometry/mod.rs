//! Geometry sampling.
//!
//! A [`ContainerData`] is a plain snapshot of the scroll container and the
//! tracked grid element, taken once per recomputation trigger. Nothing here
//! computes anything; the snapshot is consumed by the layout stages and the
//! loader.

use serde::{Deserialize, Serialize};

/// Width and height in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in px.
    pub width: f64,
    /// Height in px.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Position and size of the tracked grid element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBox {
    /// Distance from the scroll origin to the element's top edge.
    pub offset_top: f64,
    /// Current rendered size of the element.
    pub size: Size,
}

impl ElementBox {
    /// Create a new element box.
    pub fn new(offset_top: f64, size: Size) -> Self {
        Self { offset_top, size }
    }
}

/// Which scroll origin a sample was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrollTarget {
    /// The global viewport scrolls.
    #[default]
    Viewport,
    /// A designated scrollable container element scrolls.
    Element,
}

/// Snapshot of the scroll container and the tracked element.
///
/// # Invariants
/// - Immutable within a pass; take a new sample for the next one.
/// - `element == None` means the tracked element is not attached yet. Every
///   stage degrades to an empty or degenerate result in that case.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerData {
    /// Where the sample came from.
    pub target: ScrollTarget,
    /// Visible size of the scroll container.
    pub container: Size,
    /// Vertical scroll offset of the container.
    pub scroll_top: f64,
    /// Tracked element geometry, if attached.
    pub element: Option<ElementBox>,
}

impl ContainerData {
    /// Snapshot for a container with an attached tracked element.
    pub fn new(container: Size, scroll_top: f64, element: ElementBox) -> Self {
        Self {
            target: ScrollTarget::Viewport,
            container,
            scroll_top,
            element: Some(element),
        }
    }

    /// Snapshot taken before the tracked element exists.
    pub fn detached(container: Size, scroll_top: f64) -> Self {
        Self {
            target: ScrollTarget::Viewport,
            container,
            scroll_top,
            element: None,
        }
    }

    /// Mark the snapshot as coming from the given scroll origin.
    pub fn with_target(mut self, target: ScrollTarget) -> Self {
        self.target = target;
        self
    }

    /// Tracked element width, if attached.
    pub fn element_width(&self) -> Option<f64> {
        self.element.map(|e| e.size.width)
    }

    /// Tracked element offset, if attached.
    pub fn element_offset(&self) -> Option<f64> {
        self.element.map(|e| e.offset_top)
    }

    /// Bottom edge of the visible band (`scroll_top + container height`).
    pub fn visible_bottom(&self) -> f64 {
        self.scroll_top + self.container.height
    }
}

/// A source of geometry snapshots (the global viewport, or a scroll element).
///
/// The loader re-samples before every fetch decision so that content laid out
/// by the previous fetch is taken into account.
pub trait GeometrySource {
    /// Take a fresh snapshot.
    fn sample(&self) -> ContainerData;
}

/// A fixed snapshot. Used by the command-line driver and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticGeometry(pub ContainerData);

impl GeometrySource for StaticGeometry {
    fn sample(&self) -> ContainerData {
        self.0
    }
}

impl<T: GeometrySource + ?Sized> GeometrySource for &T {
    fn sample(&self) -> ContainerData {
        (**self).sample()
    }
}
