//! masonry-grid
//!
//! Incremental, virtualized masonry-grid layout for large, growing item
//! collections, plus the scroll-driven loader that grows them.
//!
//! Pure Core / Impure Shell: `grid` and `integration` are total functions of
//! `(items, geometry)`; `loading` holds the only state; `config`, `logging`
//! and `source` are the shell used by the `mgrid` driver.

pub mod config;
pub mod geometry;
pub mod grid;
pub mod loading;
pub mod logging;
pub mod model;
pub mod source;

// Re-export main pipeline integration
pub mod integration;

#[cfg(test)]
mod tests;
