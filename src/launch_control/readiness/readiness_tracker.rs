use crate::event;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Snapshot of the two actuator readiness flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessFlags {
    /// The velocity actuator reached the last commanded launch speed.
    pub velocity_ready: bool,
    /// The yaw actuator reached the last commanded bearing.
    pub yaw_ready: bool,
}

impl ReadinessFlags {
    pub fn both(&self) -> bool { self.velocity_ready && self.yaw_ready }
}

#[derive(Debug, Default)]
struct FlagCell {
    flags: ReadinessFlags,
    /// Time of the last dispatch that cleared the flags.
    cleared_at: Option<DateTime<Utc>>,
}

/// Shared readiness and abort bookkeeping between the transport and the controller tick.
///
/// The flag pair lives behind one lock, so a reader never sees half of an update and a
/// dispatch clears both flags in one step. The abort request is an edge: every
/// [`ReadinessTracker::raise_abort`] is observed by exactly one
/// [`ReadinessTracker::consume_abort`].
#[derive(Debug)]
pub struct ReadinessTracker {
    cell: Mutex<FlagCell>,
    abort: AtomicBool,
    /// Window after a dispatch in which `true` reports are treated as stale.
    holdoff: TimeDelta,
}

impl ReadinessTracker {
    pub fn new(holdoff: TimeDelta) -> Self {
        Self { cell: Mutex::new(FlagCell::default()), abort: AtomicBool::new(false), holdoff }
    }

    /// Applies a velocity readiness report received at `at`.
    ///
    /// `at` must come from the same clock as the `now` passed to
    /// [`ReadinessTracker::clear_with`], otherwise the holdoff window is meaningless.
    pub async fn set_velocity_ready(&self, ready: bool, at: DateTime<Utc>) {
        let mut cell = self.cell.lock().await;
        if self.accepts(&cell, ready, at, "velocity") {
            cell.flags.velocity_ready = ready;
        }
    }

    /// Applies a yaw readiness report received at `at`.
    pub async fn set_yaw_ready(&self, ready: bool, at: DateTime<Utc>) {
        let mut cell = self.cell.lock().await;
        if self.accepts(&cell, ready, at, "yaw") {
            cell.flags.yaw_ready = ready;
        }
    }

    /// Registers an abort request. Repeated raises before a consume collapse into one.
    pub fn raise_abort(&self) { self.abort.store(true, Ordering::SeqCst); }

    /// Takes the pending abort request.
    ///
    /// # Returns
    /// `true` exactly once per raised abort, `false` otherwise.
    pub fn consume_abort(&self) -> bool { self.abort.swap(false, Ordering::SeqCst) }

    pub async fn both_ready(&self) -> bool { self.cell.lock().await.flags.both() }

    pub async fn snapshot(&self) -> ReadinessFlags { self.cell.lock().await.flags }

    /// Clears both flags without starting a holdoff window.
    pub async fn clear(&self) { self.cell.lock().await.flags = ReadinessFlags::default(); }

    /// Clears both flags and runs `send` while still holding the flag lock.
    ///
    /// Readiness reports delivered before this call can not survive it, and reports
    /// for the new command can not be applied before `send` has run.
    ///
    /// # Arguments
    /// * `now` – Dispatch time, start of the holdoff window.
    /// * `send` – Closure emitting the new commands.
    pub async fn clear_with<R>(&self, now: DateTime<Utc>, send: impl FnOnce() -> R) -> R {
        let mut cell = self.cell.lock().await;
        cell.flags = ReadinessFlags::default();
        cell.cleared_at = Some(now);
        send()
    }

    /// Holdoff gate for incoming reports.
    ///
    /// A `true` stamped less than `holdoff` after the last dispatch, or before it, is
    /// taken as a leftover of the previous command. This only suits actuators that keep
    /// re-publishing their readiness: one that reports `true` a single time, inside the
    /// window, is never seen as ready and the command runs into its timeout. Such
    /// transports need a zero holdoff.
    fn accepts(&self, cell: &FlagCell, ready: bool, at: DateTime<Utc>, actuator: &str) -> bool {
        if !ready || self.holdoff <= TimeDelta::zero() {
            return true;
        }
        match cell.cleared_at {
            Some(t) if at - t < self.holdoff => {
                event!("Ignoring stale {actuator} readiness report inside dispatch holdoff.");
                false
            }
            _ => true,
        }
    }
}
