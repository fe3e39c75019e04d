//! Infinite xz plane.

use lumen_math::{point, vector, BoundingBox, Ray, Tuple, EPSILON};

use crate::shape::{LocalHit, Primitive};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Plane;

impl Primitive for Plane {
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        // Parallel or coplanar rays never hit
        if ray.direction.y.abs() < EPSILON {
            return Vec::new();
        }
        vec![LocalHit::new(-ray.origin.y / ray.direction.y)]
    }

    fn local_normal_at(&self, _point: Tuple, _hit: &LocalHit) -> Tuple {
        vector(0.0, 1.0, 0.0)
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            point(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
            point(f64::INFINITY, 0.0, f64::INFINITY),
        )
    }
}
