//! Cylinders and cones around the y axis.
//!
//! Both are infinite by default and can be truncated to the open interval
//! (`minimum`, `maximum`) along y, optionally capped at the ends.

use lumen_math::{near, point, vector, BoundingBox, Interval, Ray, Tuple, EPSILON};

use crate::shape::{LocalHit, Primitive};

/// Cylinder of radius 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cylinder {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Cylinder {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn extent(&self) -> Interval {
        Interval::new(self.minimum, self.maximum)
    }
}

impl Default for Cylinder {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}

impl Primitive for Cylinder {
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        let (o, d) = (ray.origin, ray.direction);
        let mut xs = Vec::new();

        let a = d.x * d.x + d.z * d.z;
        // Parallel to the axis: only the caps can be hit
        if !near(a, 0.0) {
            let b = 2.0 * o.x * d.x + 2.0 * o.z * d.z;
            let c = o.x * o.x + o.z * o.z - 1.0;
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                return xs;
            }
            let sqrtd = discriminant.sqrt();
            push_within(&mut xs, ray, self.extent(), (-b - sqrtd) / (2.0 * a));
            push_within(&mut xs, ray, self.extent(), (-b + sqrtd) / (2.0 * a));
        }

        if self.closed {
            intersect_caps(&mut xs, ray, self.minimum, 1.0);
            intersect_caps(&mut xs, ray, self.maximum, 1.0);
        }
        xs
    }

    fn local_normal_at(&self, point: Tuple, _hit: &LocalHit) -> Tuple {
        let dist = point.x * point.x + point.z * point.z;
        if dist < 1.0 && point.y >= self.maximum - EPSILON {
            vector(0.0, 1.0, 0.0)
        } else if dist < 1.0 && point.y <= self.minimum + EPSILON {
            vector(0.0, -1.0, 0.0)
        } else {
            vector(point.x, 0.0, point.z)
        }
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(point(-1.0, self.minimum, -1.0), point(1.0, self.maximum, 1.0))
    }
}

/// Double-napped cone whose radius at height y is |y|.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cone {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Cone {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn extent(&self) -> Interval {
        Interval::new(self.minimum, self.maximum)
    }
}

impl Default for Cone {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}

impl Primitive for Cone {
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        let (o, d) = (ray.origin, ray.direction);
        let mut xs = Vec::new();

        let a = d.x * d.x - d.y * d.y + d.z * d.z;
        let b = 2.0 * (o.x * d.x - o.y * d.y + o.z * d.z);
        let c = o.x * o.x - o.y * o.y + o.z * o.z;

        if near(a, 0.0) {
            // Parallel to one nappe: a single crossing of the other
            if !near(b, 0.0) {
                push_within(&mut xs, ray, self.extent(), -c / (2.0 * b));
            }
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                return xs;
            }
            let sqrtd = discriminant.sqrt();
            let t0 = (-b - sqrtd) / (2.0 * a);
            let t1 = (-b + sqrtd) / (2.0 * a);
            let (t0, t1) = if t0 > t1 { (t1, t0) } else { (t0, t1) };
            push_within(&mut xs, ray, self.extent(), t0);
            push_within(&mut xs, ray, self.extent(), t1);
        }

        if self.closed {
            intersect_caps(&mut xs, ray, self.minimum, self.minimum.abs());
            intersect_caps(&mut xs, ray, self.maximum, self.maximum.abs());
        }
        xs
    }

    fn local_normal_at(&self, point: Tuple, _hit: &LocalHit) -> Tuple {
        let dist = point.x * point.x + point.z * point.z;
        if point.y >= self.maximum - EPSILON && dist < self.maximum * self.maximum {
            return vector(0.0, 1.0, 0.0);
        }
        if point.y <= self.minimum + EPSILON && dist < self.minimum * self.minimum {
            return vector(0.0, -1.0, 0.0);
        }

        let y = dist.sqrt();
        let y = if point.y > 0.0 { -y } else { y };
        vector(point.x, y, point.z)
    }

    fn bounds(&self) -> BoundingBox {
        let limit = self.minimum.abs().max(self.maximum.abs());
        BoundingBox::new(point(-limit, self.minimum, -limit), point(limit, self.maximum, limit))
    }
}

/// Keep `t` if the hit lies strictly inside the truncation interval.
fn push_within(xs: &mut Vec<LocalHit>, ray: &Ray, extent: Interval, t: f64) {
    let y = ray.origin.y + t * ray.direction.y;
    if extent.surrounds(y) {
        xs.push(LocalHit::new(t));
    }
}

/// Intersect the horizontal disk of `radius` at height `y`. The rim counts
/// as part of the cap.
fn intersect_caps(xs: &mut Vec<LocalHit>, ray: &Ray, y: f64, radius: f64) {
    if !y.is_finite() || near(ray.direction.y, 0.0) {
        return;
    }
    let t = (y - ray.origin.y) / ray.direction.y;
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    if x * x + z * z <= radius * radius + EPSILON {
        xs.push(LocalHit::new(t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(p: &dyn Primitive, origin: Tuple, direction: Tuple) -> Vec<f64> {
        p.local_intersect(&Ray::new(origin, direction.normalize()))
            .iter()
            .map(|h| h.t)
            .collect()
    }

    #[test]
    fn test_cylinder_misses() {
        let cyl = Cylinder::default();
        let cases = [
            (point(1.0, 0.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.0, 0.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.0, 0.0, -5.0), vector(1.0, 1.0, 1.0)),
        ];
        for (origin, direction) in cases {
            assert!(ts(&cyl, origin, direction).is_empty());
        }
    }

    #[test]
    fn test_cylinder_hits() {
        let cyl = Cylinder::default();
        let cases = [
            (point(1.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 5.0, 5.0),
            (point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 4.0, 6.0),
            (point(0.5, 0.0, -5.0), vector(0.1, 1.0, 1.0), 6.80798, 7.08872),
        ];
        for (origin, direction, t0, t1) in cases {
            let xs = ts(&cyl, origin, direction);
            assert_eq!(xs.len(), 2);
            assert!(near(xs[0], t0), "{} != {}", xs[0], t0);
            assert!(near(xs[1], t1), "{} != {}", xs[1], t1);
        }
    }

    #[test]
    fn test_cylinder_normals() {
        let cyl = Cylinder::default();
        let hit = LocalHit::new(0.0);
        let cases = [
            (point(1.0, 0.0, 0.0), vector(1.0, 0.0, 0.0)),
            (point(0.0, 5.0, -1.0), vector(0.0, 0.0, -1.0)),
            (point(0.0, -2.0, 1.0), vector(0.0, 0.0, 1.0)),
            (point(-1.0, 1.0, 0.0), vector(-1.0, 0.0, 0.0)),
        ];
        for (p, expected) in cases {
            assert_eq!(cyl.local_normal_at(p, &hit), expected);
        }
    }

    #[test]
    fn test_truncated_cylinder() {
        let cyl = Cylinder::new(1.0, 2.0, false);
        let cases = [
            (point(0.0, 1.5, 0.0), vector(0.1, 1.0, 0.0), 0),
            (point(0.0, 3.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 2.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 1.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 1.5, -2.0), vector(0.0, 0.0, 1.0), 2),
        ];
        for (origin, direction, count) in cases {
            assert_eq!(ts(&cyl, origin, direction).len(), count);
        }
    }

    #[test]
    fn test_capped_cylinder() {
        let cyl = Cylinder::new(1.0, 2.0, true);
        let cases = [
            (point(0.0, 3.0, 0.0), vector(0.0, -1.0, 0.0), 2),
            (point(0.0, 3.0, -2.0), vector(0.0, -1.0, 2.0), 2),
            (point(0.0, 4.0, -2.0), vector(0.0, -1.0, 1.0), 2),
            (point(0.0, 0.0, -2.0), vector(0.0, 1.0, 2.0), 2),
            (point(0.0, -1.0, -2.0), vector(0.0, 1.0, 1.0), 2),
        ];
        for (origin, direction, count) in cases {
            assert_eq!(ts(&cyl, origin, direction).len(), count, "ray from {:?}", origin);
        }
    }

    #[test]
    fn test_cylinder_cap_normals() {
        let cyl = Cylinder::new(1.0, 2.0, true);
        let hit = LocalHit::new(0.0);
        let cases = [
            (point(0.0, 1.0, 0.0), vector(0.0, -1.0, 0.0)),
            (point(0.5, 1.0, 0.0), vector(0.0, -1.0, 0.0)),
            (point(0.0, 1.0, 0.5), vector(0.0, -1.0, 0.0)),
            (point(0.0, 2.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.5, 2.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.0, 2.0, 0.5), vector(0.0, 1.0, 0.0)),
        ];
        for (p, expected) in cases {
            assert_eq!(cyl.local_normal_at(p, &hit), expected);
        }
    }

    #[test]
    fn test_cylinder_bounds() {
        let b = Cylinder::new(-5.0, 3.0, false).bounds();
        assert_eq!(b.min, point(-1.0, -5.0, -1.0));
        assert_eq!(b.max, point(1.0, 3.0, 1.0));

        let b = Cylinder::default().bounds();
        assert_eq!(b.min, point(-1.0, f64::NEG_INFINITY, -1.0));
        assert_eq!(b.max, point(1.0, f64::INFINITY, 1.0));
    }

    #[test]
    fn test_cone_hits() {
        let cone = Cone::default();
        let cases = [
            (point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 5.0, 5.0),
            (point(0.0, 0.0, -5.0), vector(1.0, 1.0, 1.0), 8.66025, 8.66025),
            (point(1.0, 1.0, -5.0), vector(-0.5, -1.0, 1.0), 4.55006, 49.44994),
        ];
        for (origin, direction, t0, t1) in cases {
            let xs = ts(&cone, origin, direction);
            assert_eq!(xs.len(), 2);
            assert!(near(xs[0], t0), "{} != {}", xs[0], t0);
            assert!(near(xs[1], t1), "{} != {}", xs[1], t1);
        }
    }

    #[test]
    fn test_cone_parallel_to_one_half() {
        let cone = Cone::default();
        let xs = ts(&cone, point(0.0, 0.0, -1.0), vector(0.0, 1.0, 1.0));
        assert_eq!(xs.len(), 1);
        assert!(near(xs[0], 0.35355));
    }

    #[test]
    fn test_capped_cone() {
        let cone = Cone::new(-0.5, 0.5, true);
        let cases = [
            (point(0.0, 0.0, -5.0), vector(0.0, 1.0, 0.0), 0),
            (point(0.0, 0.0, -0.25), vector(0.0, 1.0, 1.0), 2),
            (point(0.0, 0.0, -0.25), vector(0.0, 1.0, 0.0), 4),
        ];
        for (origin, direction, count) in cases {
            assert_eq!(ts(&cone, origin, direction).len(), count, "ray from {:?}", origin);
        }
    }

    #[test]
    fn test_cone_normals() {
        let cone = Cone::default();
        let hit = LocalHit::new(0.0);
        let cases = [
            (point(0.0, 0.0, 0.0), vector(0.0, 0.0, 0.0)),
            (point(1.0, 1.0, 1.0), vector(1.0, -(2f64.sqrt()), 1.0)),
            (point(-1.0, -1.0, 0.0), vector(-1.0, 1.0, 0.0)),
        ];
        for (p, expected) in cases {
            assert_eq!(cone.local_normal_at(p, &hit), expected);
        }
    }

    #[test]
    fn test_cone_bounds() {
        let b = Cone::new(-5.0, 3.0, false).bounds();
        assert_eq!(b.min, point(-5.0, -5.0, -5.0));
        assert_eq!(b.max, point(5.0, 3.0, 5.0));

        let b = Cone::default().bounds();
        assert_eq!(b.min, point(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY));
        assert_eq!(b.max, point(f64::INFINITY, f64::INFINITY, f64::INFINITY));
    }
}
