//! The only state shared between the asynchronous transport side and the controller tick.

mod readiness_tracker;
mod target_slot;

pub use readiness_tracker::{ReadinessFlags, ReadinessTracker};
pub use target_slot::{PendingTarget, TargetSlot};
