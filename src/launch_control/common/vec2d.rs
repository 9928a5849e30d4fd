use num::traits::Float;

/// A planar 2D vector generic over any floating point type.
///
/// Used for the horizontal part of launcher geometry: bearings, ground distances and
/// offsets between the launcher and a target are all expressed as `Vec2D`.
///
/// # Type Parameters
/// * `T` - The functionality for the vector depends on traits implemented by `T`.
#[derive(Debug, PartialEq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Vec2D<T> {
    /// The x-component of the vector.
    x: T,
    /// The y-component of the vector.
    y: T,
}

impl<T: Copy> Vec2D<T> {
    /// Creates a new vector with the given x and y components.
    pub const fn new(x: T, y: T) -> Self { Self { x, y } }
}

impl<T> Vec2D<T>
where T: Float
{
    /// Computes the magnitude (absolute value) of the vector.
    pub fn abs(&self) -> T { self.x.hypot(self.y) }

    /// Creates a vector pointing from the current vector (`self`) to another vector (`other`).
    ///
    /// # Arguments
    /// * `other` - The target vector.
    ///
    /// # Returns
    /// A new vector representing the direction from `self` to `other`.
    pub fn to(&self, other: &Vec2D<T>) -> Vec2D<T> { Vec2D::new(other.x - self.x, other.y - self.y) }

    /// Heading of the vector in radians, measured counter-clockwise from the positive x-axis.
    ///
    /// # Returns
    /// An angle in `(-pi, pi]`. A zero vector yields `0`.
    pub fn heading(&self) -> T { self.y.atan2(self.x) }

    /// Computes the Euclidean distance between the current vector and another vector.
    pub fn euclid_distance(&self, other: &Self) -> T { self.to(other).abs() }

    /// Checks whether both components are finite numbers.
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}
