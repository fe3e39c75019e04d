//! Axis-aligned cube spanning -1..1 on every axis.

use lumen_math::{point, vector, BoundingBox, Interval, Ray, Tuple};

use crate::shape::{LocalHit, Primitive};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cube;

const UNIT: Interval = Interval { min: -1.0, max: 1.0 };

impl Primitive for Cube {
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        let tx = Interval::slab(ray.origin.x, ray.direction.x, UNIT);
        let ty = Interval::slab(ray.origin.y, ray.direction.y, UNIT);
        let tz = Interval::slab(ray.origin.z, ray.direction.z, UNIT);

        let tmin = tx.min.max(ty.min).max(tz.min);
        let tmax = tx.max.min(ty.max).min(tz.max);
        if tmin > tmax {
            return Vec::new();
        }
        vec![LocalHit::new(tmin), LocalHit::new(tmax)]
    }

    fn local_normal_at(&self, point: Tuple, _hit: &LocalHit) -> Tuple {
        let max_c = point.x.abs().max(point.y.abs()).max(point.z.abs());
        if max_c == point.x.abs() {
            vector(point.x, 0.0, 0.0)
        } else if max_c == point.y.abs() {
            vector(0.0, point.y, 0.0)
        } else {
            vector(0.0, 0.0, point.z)
        }
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
