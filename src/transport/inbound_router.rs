use super::InboundMessage;
use crate::launch_control::readiness::{ReadinessTracker, TargetSlot};
use crate::{event, info, warn};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;

/// Applies inbound notifications to the shared readiness state and the target slot.
pub struct InboundRouter {
    tracker: Arc<ReadinessTracker>,
    slot: TargetSlot,
}

impl InboundRouter {
    pub fn new(tracker: Arc<ReadinessTracker>, slot: TargetSlot) -> Self { Self { tracker, slot } }

    /// Applies a single message. Readiness reports are stamped with the wall clock on
    /// receipt, the same clock the controller ticks on.
    pub async fn apply(&self, msg: InboundMessage) {
        match msg {
            InboundMessage::TargetPose(pose) => {
                event!("New target pose at {}.", pose.position());
                self.slot.offer(pose);
            }
            InboundMessage::VelocityReady(ready) => self.tracker.set_velocity_ready(ready, Utc::now()).await,
            InboundMessage::YawReady(ready) => self.tracker.set_yaw_ready(ready, Utc::now()).await,
            InboundMessage::Abort => {
                warn!("Abort requested!");
                self.tracker.raise_abort();
            }
        }
    }

    /// Drains the inbound channel until it closes or `c_tok` is cancelled.
    ///
    /// Should be spawned as a background task.
    pub async fn run(self, mut rx: Receiver<InboundMessage>, c_tok: CancellationToken) {
        loop {
            tokio::select! {
                () = c_tok.cancelled() => break,
                msg = rx.recv() => match msg {
                    Some(m) => self.apply(m).await,
                    None => {
                        info!("Inbound channel closed, stopping router.");
                        break;
                    }
                }
            }
        }
    }
}
