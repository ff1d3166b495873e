//! Scroll-driven incremental loading.
//!
//! - `state`: LoadingState flags and the pure fetch trigger predicate
//! - `controller`: LoadController - async single-flight fetch loop

pub mod controller;
pub mod state;

pub use controller::{Fetcher, LoadController, LoadOutcome, Stop};
pub use state::{
    should_fetch, trigger_threshold, Blocked, LoadPhase, LoadingState,
    DEFAULT_UPDATE_TRIGGER_MARGIN,
};
