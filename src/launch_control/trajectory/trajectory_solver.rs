use super::target_pose::{Position3D, TargetPose};
use crate::launch_control::{LaunchError, Unreachable};
use std::f64::consts::{FRAC_PI_4, PI};

/// Fixed physical setup of the launcher used by the [`TrajectorySolver`].
///
/// The launcher fires at a fixed elevation. Only yaw and launch speed are solved for.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LauncherGeometry {
    /// Launch point in the target frame, in meters.
    pub position: Position3D,
    /// Fixed launch elevation above the horizon, in radians. Must lie in `(0, pi/2)`.
    pub elevation: f64,
    /// Gravitational acceleration in m/s^2.
    pub gravity: f64,
    /// Highest launch speed the velocity actuator can deliver, in m/s.
    pub max_velocity: f64,
    /// Smallest horizontal distance that is still considered a valid shot, in meters.
    pub min_range: f64,
    /// Yaw travel of the launcher as `(min, max)` in radians, within `[-pi, pi]`.
    pub yaw_limits: (f64, f64),
}

impl LauncherGeometry {
    pub const DEF_POSITION: Position3D = Position3D::new(0.0, 0.0, 0.5);
    pub const DEF_ELEVATION: f64 = FRAC_PI_4;
    pub const DEF_GRAVITY: f64 = 9.81;
    pub const DEF_MAX_VELOCITY: f64 = 15.0;
    pub const DEF_MIN_RANGE: f64 = 0.5;
    pub const DEF_YAW_LIMITS: (f64, f64) = (-PI, PI);

    /// Checks that the geometry describes a launcher the solver can work with.
    ///
    /// # Returns
    /// `Err` with a description of the first implausible parameter.
    pub fn check(&self) -> Result<(), &'static str> {
        if !self.position.is_finite() {
            return Err("launcher position must be finite");
        }
        if !(self.elevation > 0.0 && self.elevation < PI / 2.0) {
            return Err("launch elevation must lie strictly between 0 and 90 degrees");
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err("gravity must be positive");
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return Err("maximum launch velocity must be positive");
        }
        if !(self.min_range.is_finite() && self.min_range >= 0.0) {
            return Err("minimum range must not be negative");
        }
        let (min, max) = self.yaw_limits;
        if !(min >= -PI && max <= PI && min < max) {
            return Err("yaw limits must be an ascending range within [-180, 180] degrees");
        }
        Ok(())
    }
}

impl Default for LauncherGeometry {
    fn default() -> Self {
        Self {
            position: Self::DEF_POSITION,
            elevation: Self::DEF_ELEVATION,
            gravity: Self::DEF_GRAVITY,
            max_velocity: Self::DEF_MAX_VELOCITY,
            min_range: Self::DEF_MIN_RANGE,
            yaw_limits: Self::DEF_YAW_LIMITS,
        }
    }
}

/// A launch command pair derived from one target pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Launcher yaw in radians.
    yaw: f64,
    /// Launch speed in m/s.
    velocity: f64,
}

impl Solution {
    pub fn new(yaw: f64, velocity: f64) -> Self { Self { yaw, velocity } }
    pub fn yaw(&self) -> f64 { self.yaw }
    pub fn velocity(&self) -> f64 { self.velocity }
}

/// Stateless ballistic solver for a drag-free launch at fixed elevation.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySolver {
    geometry: LauncherGeometry,
}

impl TrajectorySolver {
    pub fn new(geometry: LauncherGeometry) -> Self { Self { geometry } }

    pub fn geometry(&self) -> &LauncherGeometry { &self.geometry }

    /// Bearing from the launcher to the target in the horizontal plane.
    ///
    /// # Returns
    /// The yaw angle in radians in `(-pi, pi]`, zero along the positive x-axis.
    pub fn solve_yaw(&self, pose: &TargetPose) -> f64 {
        self.geometry.position.planar().to(&pose.position().planar()).heading()
    }

    /// Launch speed that makes a projectile fired at the fixed elevation pass through
    /// the target position.
    ///
    /// With horizontal distance `d`, height difference `h` and elevation `a` the
    /// trajectory `h = d*tan(a) - g*d^2 / (2*v^2*cos^2(a))` gives
    /// `v^2 = g*d^2 / (2*cos^2(a) * (d*tan(a) - h))`.
    ///
    /// # Returns
    /// * `Ok(velocity)`, strictly positive and finite.
    /// * `Err(Unreachable)` if no such speed exists within the launcher's envelope.
    pub fn solve_velocity(&self, pose: &TargetPose) -> Result<f64, Unreachable> {
        let geo = &self.geometry;
        let distance = geo.position.planar().euclid_distance(&pose.position().planar());
        let height = pose.position().z - geo.position.z;
        if distance < geo.min_range || distance <= 0.0 {
            return Err(Unreachable::TooClose { distance });
        }

        let cos_elev = geo.elevation.cos();
        let launch_line_margin = distance * geo.elevation.tan() - height;
        if launch_line_margin <= 0.0 {
            return Err(Unreachable::AboveLaunchLine { distance, height });
        }

        let v_sq = geo.gravity * distance.powi(2) / (2.0 * cos_elev.powi(2) * launch_line_margin);
        let velocity = v_sq.sqrt();
        if !velocity.is_finite() || velocity > geo.max_velocity {
            return Err(Unreachable::BeyondMaxVelocity { required: velocity });
        }
        Ok(velocity)
    }

    /// Full solution for a validated pose, including the yaw travel check.
    pub fn solve(&self, pose: &TargetPose) -> Result<Solution, LaunchError> {
        let yaw = self.solve_yaw(pose);
        let (min_yaw, max_yaw) = self.geometry.yaw_limits;
        if yaw < min_yaw || yaw > max_yaw {
            return Err(Unreachable::OutsideBearingLimits { yaw }.into());
        }
        let velocity = self.solve_velocity(pose)?;
        Ok(Solution::new(yaw, velocity))
    }
}
