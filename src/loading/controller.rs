//! Scroll-driven batch loading with a single-flight guarantee.
//!
//! [`LoadController::evaluate`] is re-entered on every mount/scroll/resize
//! event. It keeps fetching while the visible band sits within the trigger
//! margin of the laid-out content, re-sampling geometry after each batch, and
//! stops on the first negative decision, on the terminal batch, or on failure.
//!
//! The controller runs on a single logical thread. The in-flight flag is set
//! before the fetch future is first polled and cleared when it completes (or is
//! dropped), so overlapping calls made while a fetch is suspended see the lock
//! and return immediately.

use super::state::{should_fetch, Blocked, LoadPhase, LoadingState, DEFAULT_UPDATE_TRIGGER_MARGIN};
use crate::geometry::GeometrySource;
use crate::model::FetchError;
use async_trait::async_trait;
use std::cell::Cell;
use tracing::{debug, info, warn};

/// Caller-supplied batch fetcher.
///
/// Each call loads one more batch into the caller-owned item list and reports
/// whether it was the last one.
#[async_trait(?Send)]
pub trait Fetcher {
    /// Fetch the next batch. `Ok(true)` means no further batches exist.
    async fn fetch(&self) -> Result<bool, FetchError>;
}

/// Why an evaluation stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stop {
    /// The trigger condition no longer holds (or never did).
    Blocked(Blocked),
    /// The fetcher failed. Not retried until the next external trigger.
    Failed(FetchError),
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Number of fetches started by this evaluation.
    pub fetches: usize,
    /// Reason the loop ended.
    pub stop: Stop,
}

impl LoadOutcome {
    /// Whether the evaluation ended because the last batch is in.
    pub fn reached_bottom(&self) -> bool {
        self.stop == Stop::Blocked(Blocked::BottomReached)
    }
}

/// Which external event triggered an evaluation. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Mount,
    Scroll,
    Resize,
    Reset,
}

/// Drives a [`Fetcher`] from geometry samples.
pub struct LoadController<F, G> {
    fetcher: F,
    geometry: G,
    update_trigger_margin: f64,
    loading_indicator: bool,
    state: Cell<LoadingState>,
}

impl<F: Fetcher, G: GeometrySource> LoadController<F, G> {
    /// Create a controller with the default 500px trigger margin and no
    /// loading indicator.
    pub fn new(fetcher: F, geometry: G) -> Self {
        Self {
            fetcher,
            geometry,
            update_trigger_margin: DEFAULT_UPDATE_TRIGGER_MARGIN,
            loading_indicator: false,
            state: Cell::new(LoadingState::default()),
        }
    }

    /// Set how many px before the end of content a fetch fires.
    pub fn with_update_trigger_margin(mut self, margin: f64) -> Self {
        self.update_trigger_margin = margin;
        self
    }

    /// Declare whether a loading indicator collaborator is configured.
    pub fn with_loading_indicator(mut self, configured: bool) -> Self {
        self.loading_indicator = configured;
        self
    }

    /// Snapshot of the loading flags.
    pub fn state(&self) -> LoadingState {
        self.state.get()
    }

    /// Current phase.
    pub fn phase(&self) -> LoadPhase {
        self.state.get().phase()
    }

    /// Whether the last batch has been received.
    pub fn is_bottom_reached(&self) -> bool {
        self.state.get().bottom_reached
    }

    /// Loading indicator configured AND a fetch in flight.
    pub fn loading_indicator_visible(&self) -> bool {
        self.loading_indicator && self.state.get().update_lock
    }

    /// The fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The geometry source.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Configured trigger margin in px.
    pub fn update_trigger_margin(&self) -> f64 {
        self.update_trigger_margin
    }

    /// Clear the terminal state so fetching may resume.
    ///
    /// An in-flight fetch is left alone; its lock is released when it finishes.
    pub fn reset(&self) {
        let mut state = self.state.get();
        state.bottom_reached = false;
        self.state.set(state);
        debug!("Loading state reset");
    }

    /// [`reset`](Self::reset) followed by an evaluation.
    pub async fn reset_and_evaluate(&self) -> LoadOutcome {
        self.reset();
        self.run(Trigger::Reset).await
    }

    /// Evaluate after the grid element is first attached.
    pub async fn on_mount(&self) -> LoadOutcome {
        self.run(Trigger::Mount).await
    }

    /// Evaluate after a scroll event.
    pub async fn on_scroll(&self) -> LoadOutcome {
        self.run(Trigger::Scroll).await
    }

    /// Evaluate after a resize event.
    pub async fn on_resize(&self) -> LoadOutcome {
        self.run(Trigger::Resize).await
    }

    /// Fetch while the trigger condition holds.
    ///
    /// Returns as soon as the condition is false, the terminal batch has been
    /// received, another evaluation holds the lock, or a fetch fails. A failed
    /// fetch is logged and handed back; it is not retried.
    pub async fn evaluate(&self) -> LoadOutcome {
        let mut fetches = 0;

        loop {
            let sample = self.geometry.sample();
            if let Err(blocked) = should_fetch(&self.state.get(), &sample, self.update_trigger_margin)
            {
                if blocked == Blocked::InFlight {
                    debug!("Fetch already in flight, skipping");
                }
                return LoadOutcome {
                    fetches,
                    stop: Stop::Blocked(blocked),
                };
            }

            let guard = FlightGuard::acquire(&self.state);
            fetches += 1;
            debug!(
                attempt = fetches,
                scroll_top = sample.scroll_top,
                visible_bottom = sample.visible_bottom(),
                "Starting fetch"
            );
            let result = self.fetcher.fetch().await;
            drop(guard);

            match result {
                Ok(true) => {
                    let mut state = self.state.get();
                    state.bottom_reached = true;
                    self.state.set(state);
                    info!(fetches, "Last batch received");
                }
                Ok(false) => {
                    debug!(attempt = fetches, "Fetch finished, more batches available");
                }
                Err(error) => {
                    warn!(%error, attempt = fetches, "Fetch failed");
                    return LoadOutcome {
                        fetches,
                        stop: Stop::Failed(error),
                    };
                }
            }
        }
    }

    async fn run(&self, trigger: Trigger) -> LoadOutcome {
        debug!(?trigger, "Evaluating load trigger");
        self.evaluate().await
    }
}

impl<F, G> std::fmt::Debug for LoadController<F, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadController")
            .field("update_trigger_margin", &self.update_trigger_margin)
            .field("loading_indicator", &self.loading_indicator)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

/// Holds `update_lock` for the lifetime of one fetch.
struct FlightGuard<'a> {
    state: &'a Cell<LoadingState>,
}

impl<'a> FlightGuard<'a> {
    fn acquire(state: &'a Cell<LoadingState>) -> Self {
        let mut current = state.get();
        debug_assert!(!current.update_lock, "fetch started while another is in flight");
        current.update_lock = true;
        state.set(current);
        Self { state }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut current = self.state.get();
        current.update_lock = false;
        self.state.set(current);
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
