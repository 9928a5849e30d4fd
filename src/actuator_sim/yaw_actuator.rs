use chrono::{DateTime, Utc};
use std::f64::consts::{PI, TAU};

/// Simulated turntable slewing toward the commanded bearing at a fixed rate.
#[derive(Debug)]
pub struct YawActuator {
    /// Slew rate in radians per second.
    slew_rate: f64,
    /// Allowed deviation in radians for the actuator to count as settled.
    tolerance: f64,
    angle: f64,
    target: Option<f64>,
    last_step: Option<DateTime<Utc>>,
}

impl YawActuator {
    pub fn new(slew_rate: f64, tolerance: f64) -> Self {
        Self { slew_rate, tolerance, angle: 0.0, target: None, last_step: None }
    }

    pub fn angle(&self) -> f64 { self.angle }

    pub fn command_yaw(&mut self, yaw: f64) { self.target = Some(wrap(yaw)); }

    /// Moves the turntable toward its target for the time passed since the last step.
    ///
    /// # Returns
    /// Whether a target is set and reached within the tolerance.
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&mut self, now: DateTime<Utc>) -> bool {
        let dt = self.last_step.map_or(0.0, |t| (now - t).num_milliseconds().max(0) as f64 / 1000.0);
        self.last_step = Some(now);
        let Some(target) = self.target else {
            return false;
        };
        let max_delta = self.slew_rate * dt;
        let delta = wrap(target - self.angle).clamp(-max_delta, max_delta);
        self.angle = wrap(self.angle + delta);
        wrap(target - self.angle).abs() <= self.tolerance
    }
}

/// Maps an angle onto `[-pi, pi)`.
fn wrap(angle: f64) -> f64 { (angle + PI).rem_euclid(TAU) - PI }
