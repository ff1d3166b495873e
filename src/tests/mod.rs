//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the whole pipeline through crate-internal types and check
//! the layout and loading guarantees end to end.


// Whitebox tests with internal access
mod pipeline_properties;
