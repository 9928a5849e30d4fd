use crate::launch_control::trajectory::TargetPose;
use tokio::sync::watch;

/// Producer side of the pending-target slot, held by the inbound transport.
///
/// The slot keeps only the latest pose. Offering a pose overwrites any pose the
/// controller has not taken yet.
#[derive(Debug)]
pub struct TargetSlot {
    tx: watch::Sender<Option<TargetPose>>,
}

/// Consumer side of the pending-target slot, owned by the controller.
#[derive(Debug)]
pub struct PendingTarget {
    rx: watch::Receiver<Option<TargetPose>>,
}

impl TargetSlot {
    /// Creates a new, empty slot.
    ///
    /// # Returns
    /// A tuple `(TargetSlot, PendingTarget)` of both ends.
    pub fn new() -> (Self, PendingTarget) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, PendingTarget { rx })
    }

    pub fn offer(&self, pose: TargetPose) { self.tx.send_replace(Some(pose)); }
}

impl PendingTarget {
    /// Takes the pending pose, if one arrived since the last take or discard.
    pub fn take(&mut self) -> Option<TargetPose> {
        if self.is_pending() { *self.rx.borrow_and_update() } else { None }
    }

    /// Drops a pending pose without using it.
    pub fn discard(&mut self) { self.rx.borrow_and_update(); }

    pub fn is_pending(&self) -> bool { self.rx.has_changed().unwrap_or(false) }
}
