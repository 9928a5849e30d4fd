use crate::launch_control::{PoseDefect, common::Vec2D};
use chrono::{DateTime, Utc};
use std::fmt::Display;

/// A point in the launcher's reference frame, in meters. `z` points up.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self { Self { x, y, z } }

    /// Projection onto the horizontal plane.
    pub fn planar(&self) -> Vec2D<f64> { Vec2D::new(self.x, self.y) }

    pub fn is_finite(&self) -> bool { self.planar().is_finite() && self.z.is_finite() }
}

impl Display for Position3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}, {:.3}]", self.x, self.y, self.z)
    }
}

/// Orientation quaternion of a target. It is carried along but not needed by the solver.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Orientation {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Orientation {
    /// Quaternions with a smaller norm than this cannot be normalized meaningfully.
    const MIN_NORM: f64 = 1e-6;

    pub const IDENTITY: Orientation = Orientation { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub fn norm(&self) -> f64 {
        (self.w.powi(2) + self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A target pose as delivered by the perception side, stamped with its receipt time.
///
/// Poses are immutable once received. A newer pose supersedes an older one as a whole.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetPose {
    position: Position3D,
    orientation: Orientation,
    received: DateTime<Utc>,
}

impl TargetPose {
    pub fn new(position: Position3D, orientation: Orientation, received: DateTime<Utc>) -> Self {
        Self { position, orientation, received }
    }

    /// Creates a pose with identity orientation, as used when only a position is known.
    pub fn from_position(position: Position3D, received: DateTime<Utc>) -> Self {
        Self::new(position, Orientation::IDENTITY, received)
    }

    pub fn position(&self) -> &Position3D { &self.position }
    pub fn orientation(&self) -> &Orientation { &self.orientation }
    pub fn received(&self) -> DateTime<Utc> { self.received }

    /// Checks the pose for data that would make the solver output meaningless.
    ///
    /// # Returns
    /// * `Ok(())` if the pose can be handed to the solver.
    /// * `Err(PoseDefect)` naming the first defect found.
    pub fn validate(&self) -> Result<(), PoseDefect> {
        if !self.position.is_finite() {
            return Err(PoseDefect::NonFinitePosition);
        }
        if !self.orientation.is_finite() {
            return Err(PoseDefect::NonFiniteOrientation);
        }
        if self.orientation.norm() < Orientation::MIN_NORM {
            return Err(PoseDefect::DegenerateOrientation);
        }
        Ok(())
    }
}
