//! Simulated actuators so the node can run standalone.
//!
//! The simulation listens on the outbound stream like real actuator drivers would and
//! reports its readiness back through the inbound channel.

mod velocity_actuator;
mod yaw_actuator;
#[cfg(test)]
mod tests;

pub use velocity_actuator::VelocityActuator;
pub use yaw_actuator::YawActuator;

use crate::transport::{InboundMessage, OutboundMessage};
use crate::{error, info, warn};
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{broadcast, broadcast::error::RecvError, mpsc};
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Physical parameters of the simulated launcher.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Launcher wheel radius in meters.
    pub wheel_radius: f64,
    pub max_rpm: f64,
    /// Wheel acceleration in rpm per second.
    pub rpm_accel: f64,
    /// Minimum time after a command before the wheel reports ready.
    pub ramp_time: TimeDelta,
    /// Time after a trigger until the wheel shuts down.
    pub cooldown: TimeDelta,
    /// Time without a command refresh until the wheel shuts down.
    pub command_timeout: TimeDelta,
    /// Turntable slew rate in radians per second.
    pub yaw_slew_rate: f64,
    /// Turntable settling tolerance in radians.
    pub yaw_tolerance: f64,
    /// Period of the simulation step and readiness report.
    pub step_period: TimeDelta,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            wheel_radius: 0.05,
            max_rpm: 10_000.0,
            rpm_accel: 5_000.0,
            ramp_time: TimeDelta::seconds(1),
            cooldown: TimeDelta::seconds(1),
            command_timeout: TimeDelta::seconds(5),
            yaw_slew_rate: 90.0_f64.to_radians(),
            yaw_tolerance: 0.5_f64.to_radians(),
            step_period: TimeDelta::milliseconds(20),
        }
    }
}

/// Both simulated actuators, driven by outbound messages.
#[derive(Debug)]
pub struct ActuatorSim {
    velocity: VelocityActuator,
    yaw: YawActuator,
}

impl ActuatorSim {
    pub fn new(config: SimConfig) -> Self {
        Self {
            velocity: VelocityActuator::new(config),
            yaw: YawActuator::new(config.yaw_slew_rate, config.yaw_tolerance),
        }
    }

    pub fn velocity(&self) -> &VelocityActuator { &self.velocity }

    pub fn yaw(&self) -> &YawActuator { &self.yaw }

    /// Feeds one outbound message to the actuators it addresses.
    pub fn apply(&mut self, msg: OutboundMessage, now: DateTime<Utc>) {
        match msg {
            OutboundMessage::VelocityCommand(v) => self.velocity.command_velocity(v, now),
            OutboundMessage::YawCommand(yaw) => self.yaw.command_yaw(yaw),
            OutboundMessage::Trigger => self.velocity.trigger(now),
            OutboundMessage::ShotConfirmed | OutboundMessage::State(_) => (),
        }
    }

    /// Steps both actuators to `now`.
    ///
    /// # Returns
    /// The readiness reports of the velocity and the yaw actuator.
    pub fn step(&mut self, now: DateTime<Utc>) -> [InboundMessage; 2] {
        [
            InboundMessage::VelocityReady(self.velocity.step(now)),
            InboundMessage::YawReady(self.yaw.step(now)),
        ]
    }
}

/// Runs the simulation until `c_tok` is cancelled or either channel closes.
///
/// Should be spawned as a background task.
pub async fn run(
    config: SimConfig,
    mut rx: broadcast::Receiver<OutboundMessage>,
    tx: mpsc::Sender<InboundMessage>,
    c_tok: CancellationToken,
) {
    let Ok(period) = config.step_period.to_std() else {
        error!("Invalid simulation step {}, actuator simulation not started.", config.step_period);
        return;
    };
    let mut sim = ActuatorSim::new(config);
    let mut ticker = interval(period);
    info!("Actuator simulation running.");
    loop {
        tokio::select! {
            () = c_tok.cancelled() => break,
            msg = rx.recv() => match msg {
                Ok(m) => sim.apply(m, Utc::now()),
                Err(RecvError::Lagged(n)) => warn!("Actuator simulation lagged by {n} messages."),
                Err(RecvError::Closed) => break,
            },
            _ = ticker.tick() => {
                for report in sim.step(Utc::now()) {
                    if tx.send(report).await.is_err() {
                        info!("Inbound channel closed, stopping actuator simulation.");
                        return;
                    }
                }
            }
        }
    }
    info!("Actuator simulation stopped.");
}
