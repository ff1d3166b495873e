//! Loading state and the fetch trigger predicate.

use crate::geometry::ContainerData;
use serde::Serialize;

/// Default distance before the end of laid-out content at which a fetch fires.
pub const DEFAULT_UPDATE_TRIGGER_MARGIN: f64 = 500.0;

/// Observable phase of the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadPhase {
    /// No fetch in flight, more data may exist.
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// The last batch has been received. Terminal until reset.
    Done,
}

/// The loader's two flags.
///
/// # Invariants
/// - `bottom_reached` only goes false -> true, except through an explicit reset.
/// - `update_lock` is never set on entry to a new fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadingState {
    /// A fetch is currently in flight.
    pub update_lock: bool,
    /// No further fetches will be attempted.
    pub bottom_reached: bool,
}

impl LoadingState {
    /// Current phase. An in-flight fetch wins over `Done` so the loading
    /// indicator stays up until the final batch lands.
    pub fn phase(&self) -> LoadPhase {
        if self.update_lock {
            LoadPhase::Fetching
        } else if self.bottom_reached {
            LoadPhase::Done
        } else {
            LoadPhase::Idle
        }
    }
}

/// Why a fetch decision came out negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blocked {
    /// Another fetch is in flight.
    InFlight,
    /// The last batch was already received.
    BottomReached,
    /// The tracked element is not attached yet.
    NoGeometry,
    /// The visible band has not reached the trigger threshold.
    BelowThreshold,
}

/// `max(0, element_offset + element_height - margin)`, if the element is attached.
pub fn trigger_threshold(container: &ContainerData, update_trigger_margin: f64) -> Option<f64> {
    let element = container.element?;
    Some((element.offset_top + element.size.height - update_trigger_margin).max(0.0))
}

/// Decide whether a fetch may start.
pub fn should_fetch(
    state: &LoadingState,
    container: &ContainerData,
    update_trigger_margin: f64,
) -> Result<(), Blocked> {
    if state.bottom_reached {
        return Err(Blocked::BottomReached);
    }
    if state.update_lock {
        return Err(Blocked::InFlight);
    }
    let threshold =
        trigger_threshold(container, update_trigger_margin).ok_or(Blocked::NoGeometry)?;
    if container.visible_bottom() >= threshold {
        Ok(())
    } else {
        Err(Blocked::BelowThreshold)
    }
}
