use super::ControllerState;
use crate::launch_control::{readiness::ReadinessTracker, trajectory::Solution};
use crate::transport::{ActuatorLink, LinkError, OutboundMessage};
use crate::{error, shot};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Emits commands, trigger pulses and state reports over the outbound link.
///
/// Transport failures are logged and returned but never retried here. Recovery is the
/// controller's business through its command timeout.
pub struct CommandDispatcher {
    link: Arc<dyn ActuatorLink>,
    tracker: Arc<ReadinessTracker>,
}

impl CommandDispatcher {
    pub fn new(link: Arc<dyn ActuatorLink>, tracker: Arc<ReadinessTracker>) -> Self {
        Self { link, tracker }
    }

    /// Sends the yaw and velocity setpoints of `solution` and clears both readiness flags
    /// in the same step.
    pub async fn dispatch(&self, solution: Solution, now: DateTime<Utc>) -> Result<(), LinkError> {
        let res = self
            .tracker
            .clear_with(now, || {
                self.link.send(OutboundMessage::YawCommand(solution.yaw()))?;
                self.link.send(OutboundMessage::VelocityCommand(solution.velocity()))
            })
            .await;
        match res {
            Ok(()) => shot!(
                "Dispatched yaw {:.2} deg, velocity {:.3} m/s.",
                solution.yaw().to_degrees(),
                solution.velocity()
            ),
            Err(e) => error!("Dispatching command pair failed: {e}"),
        }
        res
    }

    /// Sends the trigger pulse, followed by the shot confirmation if the pulse went out.
    pub fn fire(&self) -> Result<(), LinkError> {
        let res = self
            .link
            .send(OutboundMessage::Trigger)
            .and_then(|()| self.link.send(OutboundMessage::ShotConfirmed));
        if let Err(e) = res {
            error!("Firing failed: {e}");
        }
        res
    }

    /// Spins the launcher down. The yaw actuator keeps its last setpoint.
    pub fn halt(&self) -> Result<(), LinkError> {
        let res = self.link.send(OutboundMessage::VelocityCommand(0.0));
        if let Err(e) = res {
            error!("Halting velocity actuator failed: {e}");
        }
        res
    }

    pub fn publish_state(&self, state: ControllerState) -> Result<(), LinkError> {
        self.link.send(OutboundMessage::State(state))
    }
}
