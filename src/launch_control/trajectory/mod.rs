mod target_pose;
#[cfg(test)]
mod tests;
mod trajectory_solver;

pub use target_pose::{Orientation, Position3D, TargetPose};
pub use trajectory_solver::{LauncherGeometry, Solution, TrajectorySolver};
