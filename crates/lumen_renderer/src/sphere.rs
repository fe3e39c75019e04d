//! Unit sphere primitive.

use lumen_math::{point, BoundingBox, Ray, Tuple};

use crate::shape::{LocalHit, Primitive};

/// Sphere of radius 1 centred on the object-space origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Sphere;

impl Primitive for Sphere {
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        let sphere_to_ray = ray.origin - Tuple::ORIGIN;

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Vec::new();
        }

        let sqrtd = discriminant.sqrt();
        let t1 = (-b - sqrtd) / (2.0 * a);
        let t2 = (-b + sqrtd) / (2.0 * a);
        vec![LocalHit::new(t1), LocalHit::new(t2)]
    }

    fn local_normal_at(&self, point: Tuple, _hit: &LocalHit) -> Tuple {
        point - Tuple::ORIGIN
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
