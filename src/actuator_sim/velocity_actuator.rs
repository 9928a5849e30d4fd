use super::SimConfig;
use crate::event;
use chrono::{DateTime, Utc};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandMode {
    NoCommand,
    Rpm,
}

/// Simulated launcher wheel drive.
///
/// A velocity command is converted into a wheel RPM setpoint which is approached with
/// a constant acceleration. The drive shuts itself down when its command is not
/// refreshed in time or once the cooldown after a trigger pulse has elapsed.
#[derive(Debug)]
pub struct VelocityActuator {
    config: SimConfig,
    mode: CommandMode,
    target_rpm: f64,
    rpm_cmd: f64,
    /// RPM at the start of the current ramp.
    initial_rpm: f64,
    /// Start of the current ramp.
    commanded_at: DateTime<Utc>,
    /// Last command or accepted trigger, watched by the command timeout.
    refreshed_at: DateTime<Utc>,
    cooling_down: bool,
    trigger_time: DateTime<Utc>,
    at_setpoint: bool,
}

impl VelocityActuator {
    pub fn new(config: SimConfig) -> Self {
        let now = Utc::now();
        Self {
            config,
            mode: CommandMode::NoCommand,
            target_rpm: 0.0,
            rpm_cmd: 0.0,
            initial_rpm: 0.0,
            commanded_at: now,
            refreshed_at: now,
            cooling_down: false,
            trigger_time: now,
            at_setpoint: false,
        }
    }

    /// Current wheel RPM setpoint.
    pub fn rpm(&self) -> f64 { self.rpm_cmd }

    pub fn target_rpm(&self) -> f64 { self.target_rpm }

    /// Converts a launch velocity in m/s to wheel RPM, clamped to the drive limit.
    pub fn velocity_to_rpm(&self, velocity: f64) -> f64 {
        (velocity * 30.0 / (self.config.wheel_radius * PI)).min(self.config.max_rpm)
    }

    /// Applies a new launch velocity setpoint. Zero or negative velocities stop the
    /// wheel immediately.
    pub fn command_velocity(&mut self, velocity: f64, now: DateTime<Utc>) {
        if velocity <= 0.0 || !velocity.is_finite() {
            event!("Velocity actuator stopped by command {velocity:.3} m/s.");
            self.shut_down();
            return;
        }
        self.target_rpm = self.velocity_to_rpm(velocity);
        self.initial_rpm = self.rpm_cmd;
        self.mode = CommandMode::Rpm;
        self.commanded_at = now;
        self.refreshed_at = now;
        self.cooling_down = false;
        self.at_setpoint = false;
        event!("Velocity actuator commanded to {:.0} rpm.", self.target_rpm);
    }

    /// Registers a trigger pulse. Only counts while a command is active and no
    /// cooldown is running.
    pub fn trigger(&mut self, now: DateTime<Utc>) {
        if self.mode != CommandMode::NoCommand && !self.cooling_down {
            self.cooling_down = true;
            self.trigger_time = now;
            self.refreshed_at = now;
            event!("Velocity actuator triggered, cooling down.");
        }
    }

    /// Advances the drive to `now`.
    ///
    /// # Returns
    /// Whether the wheel is at its setpoint.
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&mut self, now: DateTime<Utc>) -> bool {
        if self.mode == CommandMode::NoCommand {
            return false;
        }
        if now - self.refreshed_at > self.config.command_timeout {
            event!("Velocity command timed out, shutting down.");
            self.shut_down();
        } else if self.cooling_down && now - self.trigger_time > self.config.cooldown {
            event!("Velocity actuator cooled down after trigger.");
            self.shut_down();
        } else {
            let ramp = now - self.commanded_at;
            if self.rpm_cmd < self.target_rpm {
                let ramp_s = ramp.num_milliseconds() as f64 / 1000.0;
                self.rpm_cmd =
                    (self.initial_rpm + ramp_s * self.config.rpm_accel).min(self.target_rpm);
            } else {
                self.rpm_cmd = self.target_rpm;
            }
            self.at_setpoint = ramp > self.config.ramp_time && self.rpm_cmd >= self.target_rpm;
        }
        self.at_setpoint
    }

    fn shut_down(&mut self) {
        self.mode = CommandMode::NoCommand;
        self.cooling_down = false;
        self.at_setpoint = false;
        self.target_rpm = 0.0;
        self.rpm_cmd = 0.0;
    }
}

