//! Triangle primitives for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lumen_math::{BoundingBox, Ray, Tuple, EPSILON};

use crate::shape::{LocalHit, Primitive};

/// A flat-shaded triangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    pub p1: Tuple,
    pub p2: Tuple,
    pub p3: Tuple,
    /// Pre-computed edges from p1
    pub e1: Tuple,
    pub e2: Tuple,
    /// Pre-computed face normal (unit length)
    pub normal: Tuple,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(&e1).normalize();
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal,
        }
    }

    /// Möller-Trumbore. Returns the hit with its barycentric `u`, `v`.
    fn hit(&self, ray: &Ray) -> Option<LocalHit> {
        let dir_cross_e2 = ray.direction.cross(&self.e2);
        let det = self.e1.dot(&dir_cross_e2);

        // Ray is parallel to triangle
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(&dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(&self.e1);
        let v = f * ray.direction.dot(&origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.e2.dot(&origin_cross_e1);
        Some(LocalHit::with_uv(t, u, v))
    }

    fn vertex_bounds(&self) -> BoundingBox {
        let mut b = BoundingBox::empty();
        b.add_point(self.p1);
        b.add_point(self.p2);
        b.add_point(self.p3);
        b
    }
}

impl Primitive for Triangle {
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        self.hit(ray).into_iter().collect()
    }

    fn local_normal_at(&self, _point: Tuple, _hit: &LocalHit) -> Tuple {
        self.normal
    }

    fn bounds(&self) -> BoundingBox {
        self.vertex_bounds()
    }
}

/// Triangle with per-vertex normals, interpolated across the face.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SmoothTriangle {
    pub triangle: Triangle,
    pub n1: Tuple,
    pub n2: Tuple,
    pub n3: Tuple,
}

impl SmoothTriangle {
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple, n1: Tuple, n2: Tuple, n3: Tuple) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }
}

impl Primitive for SmoothTriangle {
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        self.triangle.local_intersect(ray)
    }

    fn local_normal_at(&self, _point: Tuple, hit: &LocalHit) -> Tuple {
        self.n2 * hit.u + self.n3 * hit.v + self.n1 * (1.0 - hit.u - hit.v)
    }

    fn bounds(&self) -> BoundingBox {
        self.triangle.vertex_bounds()
    }
}
