use strum_macros::Display;

/// Reasons why the trajectory solver could not produce a physical launch solution.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum Unreachable {
    /// The horizontal distance to the target is below the minimum launch range.
    TooClose { distance: f64 },
    /// The target lies on or above the straight launch line at the fixed elevation.
    AboveLaunchLine { distance: f64, height: f64 },
    /// The required launch speed exceeds what the velocity actuator can deliver.
    BeyondMaxVelocity { required: f64 },
    /// The bearing to the target is outside of the launcher's yaw travel.
    OutsideBearingLimits { yaw: f64 },
}

/// Reasons why a target pose was rejected before reaching the solver.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PoseDefect {
    NonFinitePosition,
    NonFiniteOrientation,
    DegenerateOrientation,
}

/// Error taxonomy of the firing-control core.
///
/// None of these are fatal. Every variant resolves into a controller state decision
/// and is kept as the controller's last reported fault.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum LaunchError {
    /// No physical ballistic solution exists. The pose is discarded.
    UnreachableTarget(Unreachable),
    /// No readiness confirmation within the command timeout over all dispatch attempts.
    ActuatorTimeout { attempts: usize },
    /// Malformed or non-finite pose data.
    InvalidPose(PoseDefect),
}

impl std::error::Error for LaunchError {}

impl From<Unreachable> for LaunchError {
    fn from(value: Unreachable) -> Self { LaunchError::UnreachableTarget(value) }
}

impl From<PoseDefect> for LaunchError {
    fn from(value: PoseDefect) -> Self { LaunchError::InvalidPose(value) }
}
