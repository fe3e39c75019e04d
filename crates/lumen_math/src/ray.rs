use crate::{Matrix, Tuple};

/// A ray with an origin point and a direction vector.
///
/// The direction is not required to be normalized; `t` values are measured in
/// units of its length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Tuple, direction: Tuple) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> Tuple {
        self.origin + self.direction * t
    }

    /// Apply `m` to both origin and direction.
    pub fn transform(&self, m: &Matrix) -> Ray {
        Ray::new(*m * self.origin, *m * self.direction)
    }
}
