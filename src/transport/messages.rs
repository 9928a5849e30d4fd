use crate::launch_control::{controller::ControllerState, trajectory::TargetPose};

/// Notifications consumed by the core.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum InboundMessage {
    /// A new target, replacing any pose not yet taken by the controller.
    TargetPose(TargetPose),
    /// Readiness report of the velocity actuator.
    VelocityReady(bool),
    /// Readiness report of the yaw actuator.
    YawReady(bool),
    /// Momentary abort request without payload.
    Abort,
}

/// Commands and events produced by the core.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum OutboundMessage {
    /// Launch speed setpoint in m/s. `0.0` spins the launcher down.
    VelocityCommand(f64),
    /// Yaw setpoint in radians.
    YawCommand(f64),
    /// Trigger pulse for the firing mechanism.
    Trigger,
    /// Emitted once for every trigger pulse that went out.
    ShotConfirmed,
    /// Controller state, published once per tick.
    State(ControllerState),
}
