//! Grid layer - config derivation, packing, windowing and render planning.
//!
//! Every stage is a total, pure function of its inputs. Results are transient
//! per-pass values and are recomputed from scratch on every trigger.
//!
//! # Module Structure
//!
//! - `derive`: Derivers, GridConfig - column count, gap, margin, resolved entries
//! - `pack`: Cell, GridLayout - column/row/offset assignment
//! - `window`: RenderWindow - cells intersecting the extended visible band
//! - `render`: RenderPlan - placements handed to the renderer

pub mod derive;
pub mod pack;
pub mod render;
pub mod window;

pub use derive::{derive_config, Derivers, GridConfig, Metric};
pub use pack::{pack, Cell, GridLayout};
pub use render::{plan, CellPlacement, RenderPlan};
pub use window::{window, RenderWindow, VisibleBand};
