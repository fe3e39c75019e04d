//! Shapes and the transform hierarchy.
//!
//! A `Shape` pairs geometry (`ShapeKind`) with a material and a transform.
//! Groups and CSG nodes own their children, so a shape can only ever have one
//! parent. Whenever a subtree is assembled or re-transformed, the composed
//! world-to-object and normal-to-world matrices are re-baked top-down. After
//! that the tree is read-only and can be shared across render threads.

use std::ptr;

use lumen_core::Material;
use lumen_math::{BoundingBox, Matrix, Ray, Tuple};

use crate::{Cone, Csg, CsgOperation, Cube, Cylinder, Group, Intersection, Plane, SmoothTriangle, Sphere, Triangle};

/// An object-space hit on a primitive. `u`/`v` are barycentric coordinates
/// for triangles and zero elsewhere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalHit {
    pub t: f64,
    pub u: f64,
    pub v: f64,
}

impl LocalHit {
    pub fn new(t: f64) -> Self {
        Self { t, u: 0.0, v: 0.0 }
    }

    pub fn with_uv(t: f64, u: f64, v: f64) -> Self {
        Self { t, u, v }
    }
}

/// Leaf geometry, expressed in its own object space.
pub trait Primitive {
    /// Intersections of an object-space ray with the primitive.
    fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit>;

    /// Surface normal at an object-space point. `hit` carries the barycentric
    /// coordinates of the intersection for interpolated normals.
    fn local_normal_at(&self, point: Tuple, hit: &LocalHit) -> Tuple;

    /// Object-space bounds.
    fn bounds(&self) -> BoundingBox;
}

#[derive(Debug, Clone)]
pub enum ShapeKind {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Group),
    Csg(Csg),
}

impl ShapeKind {
    fn primitive(&self) -> Option<&dyn Primitive> {
        match self {
            ShapeKind::Sphere(s) => Some(s),
            ShapeKind::Plane(p) => Some(p),
            ShapeKind::Cube(c) => Some(c),
            ShapeKind::Cylinder(c) => Some(c),
            ShapeKind::Cone(c) => Some(c),
            ShapeKind::Triangle(t) => Some(t),
            ShapeKind::SmoothTriangle(t) => Some(t),
            ShapeKind::Group(_) | ShapeKind::Csg(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shape {
    pub kind: ShapeKind,
    pub material: Material,
    transform: Matrix,
    inverse: Matrix,
    /// inverse * parent's world_inverse
    world_inverse: Matrix,
    /// parent's normal_to_world * inverse^T
    normal_to_world: Matrix,
    /// Object-space bounds, fixed once the subtree is built
    bounds: BoundingBox,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        let bounds = match &kind {
            ShapeKind::Group(group) => group.bounds(),
            ShapeKind::Csg(csg) => csg.bounds(),
            leaf => leaf.primitive().map(|p| p.bounds()).unwrap_or_default(),
        };
        let mut shape = Self {
            kind,
            material: Material::default(),
            transform: Matrix::IDENTITY,
            inverse: Matrix::IDENTITY,
            world_inverse: Matrix::IDENTITY,
            normal_to_world: Matrix::IDENTITY,
            bounds,
        };
        shape.bake(&Matrix::IDENTITY, &Matrix::IDENTITY);
        shape
    }

    pub fn sphere() -> Self {
        Self::new(ShapeKind::Sphere(Sphere))
    }

    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane(Plane))
    }

    pub fn cube() -> Self {
        Self::new(ShapeKind::Cube(Cube))
    }

    /// Cylinder of radius 1 around the y axis, truncated to (`minimum`, `maximum`).
    pub fn cylinder(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::new(ShapeKind::Cylinder(Cylinder::new(minimum, maximum, closed)))
    }

    /// Double-napped cone around the y axis, truncated to (`minimum`, `maximum`).
    pub fn cone(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::new(ShapeKind::Cone(Cone::new(minimum, maximum, closed)))
    }

    pub fn triangle(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(p1: Tuple, p2: Tuple, p3: Tuple, n1: Tuple, n2: Tuple, n3: Tuple) -> Self {
        Self::new(ShapeKind::SmoothTriangle(SmoothTriangle::new(p1, p2, p3, n1, n2, n3)))
    }

    /// Group taking ownership of already-built children.
    pub fn group(children: Vec<Shape>) -> Self {
        Self::new(ShapeKind::Group(Group::new(children)))
    }

    pub fn csg(operation: CsgOperation, left: Shape, right: Shape) -> Self {
        Self::new(ShapeKind::Csg(Csg::new(operation, left, right)))
    }

    pub fn with_transform(mut self, transform: Matrix) -> Self {
        self.inverse = transform.inverse();
        self.transform = transform;
        self.bake(&Matrix::IDENTITY, &Matrix::IDENTITY);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    /// Object-space bounding box.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Bounding box in the parent's space. An empty box stays empty.
    pub fn parent_space_bounds(&self) -> BoundingBox {
        self.bounds.transform(&self.transform)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, ShapeKind::Group(_) | ShapeKind::Csg(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_csg(&self) -> Option<&Csg> {
        match &self.kind {
            ShapeKind::Csg(csg) => Some(csg),
            _ => None,
        }
    }

    /// Compose this node's matrices with its parent's and push them down.
    fn bake(&mut self, parent_inverse: &Matrix, parent_normal: &Matrix) {
        self.world_inverse = self.inverse * *parent_inverse;
        self.normal_to_world = *parent_normal * self.inverse.transpose();

        let (world_inverse, normal_to_world) = (self.world_inverse, self.normal_to_world);
        match &mut self.kind {
            ShapeKind::Group(group) => {
                for child in group.children_mut() {
                    child.bake(&world_inverse, &normal_to_world);
                }
            }
            ShapeKind::Csg(csg) => {
                let (left, right) = csg.children_mut();
                left.bake(&world_inverse, &normal_to_world);
                right.bake(&world_inverse, &normal_to_world);
            }
            _ => {}
        }
    }

    /// Intersections of a ray given in the parent's space, sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        let local_ray = ray.transform(&self.inverse);

        let mut xs = match &self.kind {
            ShapeKind::Group(group) => {
                if !self.bounds.is_intersected_by(&local_ray) {
                    return Vec::new();
                }
                group.intersect(&local_ray)
            }
            ShapeKind::Csg(csg) => {
                if !self.bounds.is_intersected_by(&local_ray) {
                    return Vec::new();
                }
                csg.intersect(&local_ray)
            }
            leaf => match leaf.primitive() {
                Some(primitive) => primitive
                    .local_intersect(&local_ray)
                    .into_iter()
                    .map(|hit| Intersection::with_uv(hit.t, self, hit.u, hit.v))
                    .collect(),
                None => Vec::new(),
            },
        };
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        xs
    }

    /// Convert a world-space point into this shape's object space.
    pub fn world_to_object(&self, point: Tuple) -> Tuple {
        self.world_inverse * point
    }

    /// Convert an object-space normal into a unit world-space vector.
    pub fn normal_to_world(&self, normal: Tuple) -> Tuple {
        (self.normal_to_world * normal).to_vector().normalize()
    }

    /// World-space surface normal at `point` for the intersection `hit`.
    ///
    /// # Panics
    ///
    /// Groups and CSG nodes have no surface of their own; asking for their
    /// normal is a bug in the caller.
    pub fn normal_at(&self, point: Tuple, hit: &Intersection) -> Tuple {
        let primitive = match self.kind.primitive() {
            Some(primitive) => primitive,
            None => panic!("normal_at called on a composite shape: {:?}", self.kind_name()),
        };
        let local_point = self.world_to_object(point);
        let local_normal = primitive.local_normal_at(local_point, &LocalHit::with_uv(hit.t, hit.u, hit.v));
        self.normal_to_world(local_normal)
    }

    /// True if `other` is this shape or lives somewhere in its subtree.
    pub fn includes(&self, other: &Shape) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        match &self.kind {
            ShapeKind::Group(group) => group.children().iter().any(|c| c.includes(other)),
            ShapeKind::Csg(csg) => csg.left().includes(other) || csg.right().includes(other),
            _ => false,
        }
    }

    /// Build a bounding volume hierarchy by recursively partitioning every
    /// group holding more than `threshold` children.
    ///
    /// Leaves are preserved exactly; only grouping structure changes.
    /// Dividing an already divided tree leaves it unchanged.
    pub fn divide(self, threshold: usize) -> Shape {
        if !self.is_composite() {
            return self;
        }
        let Shape {
            kind,
            material,
            transform,
            ..
        } = self;

        let kind = match kind {
            ShapeKind::Group(group) => ShapeKind::Group(group.divide(threshold)),
            ShapeKind::Csg(csg) => ShapeKind::Csg(csg.divide(threshold)),
            leaf => leaf,
        };
        Shape::new(kind).with_material(material).with_transform(transform)
    }

    /// Number of leaf shapes in the subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            ShapeKind::Group(group) => group.children().iter().map(Shape::leaf_count).sum(),
            ShapeKind::Csg(csg) => csg.left().leaf_count() + csg.right().leaf_count(),
            _ => 1,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Sphere(_) => "sphere",
            ShapeKind::Plane(_) => "plane",
            ShapeKind::Cube(_) => "cube",
            ShapeKind::Cylinder(_) => "cylinder",
            ShapeKind::Cone(_) => "cone",
            ShapeKind::Triangle(_) => "triangle",
            ShapeKind::SmoothTriangle(_) => "smooth triangle",
            ShapeKind::Group(_) => "group",
            ShapeKind::Csg(_) => "csg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{point, vector};
    use std::f64::consts::PI;

    #[test]
    fn test_default_transform_and_material() {
        let s = Shape::sphere();
        assert_eq!(*s.transform(), Matrix::IDENTITY);
        assert_eq!(s.material.ambient, 0.1);
    }

    #[test]
    fn test_intersect_uses_inverse_transform() {
        let r = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
        let s = Shape::sphere().with_transform(Matrix::scaling(2.0, 2.0, 2.0));
        let xs = s.intersect(&r);
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].t, 3.0);
        assert_eq!(xs[1].t, 7.0);

        let s = Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0));
        assert!(s.intersect(&r).is_empty());
    }

    #[test]
    fn test_normal_on_translated_sphere() {
        let s = Shape::sphere().with_transform(Matrix::translation(0.0, 1.0, 0.0));
        let xs = s.intersect(&Ray::new(point(0.0, 1.70711, -5.0), vector(0.0, 0.0, 1.0)));
        let n = s.normal_at(point(0.0, 1.70711, -0.70711), &xs[0]);
        assert_eq!(n, vector(0.0, 0.70711, -0.70711));
    }

    #[test]
    fn test_normal_on_transformed_sphere() {
        let m = Matrix::scaling(1.0, 0.5, 1.0) * Matrix::rotation_z(PI / 5.0);
        let s = Shape::sphere().with_transform(m);
        let hit = Intersection::new(1.0, &s);
        let half = 2f64.sqrt() / 2.0;
        let n = s.normal_at(point(0.0, half, -half), &hit);
        assert_eq!(n, vector(0.0, 0.97014, -0.24254));
    }

    #[test]
    fn test_world_to_object_through_groups() {
        let s = Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0));
        let g2 = Shape::group(vec![s]).with_transform(Matrix::scaling(2.0, 2.0, 2.0));
        let g1 = Shape::group(vec![g2]).with_transform(Matrix::rotation_y(PI / 2.0));

        let g2 = &g1.as_group().unwrap().children()[0];
        let s = &g2.as_group().unwrap().children()[0];
        assert_eq!(s.world_to_object(point(-2.0, 0.0, -10.0)), point(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normal_to_world_through_groups() {
        let s = Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0));
        let g2 = Shape::group(vec![s]).with_transform(Matrix::scaling(1.0, 2.0, 3.0));
        let g1 = Shape::group(vec![g2]).with_transform(Matrix::rotation_y(PI / 2.0));

        let g2 = &g1.as_group().unwrap().children()[0];
        let s = &g2.as_group().unwrap().children()[0];
        let third = 3f64.sqrt() / 3.0;
        let n = s.normal_to_world(vector(third, third, third));
        assert_eq!(n, vector(0.28571, 0.42857, -0.85714));
    }

    #[test]
    fn test_normal_of_child_in_group() {
        let s = Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0));
        let g2 = Shape::group(vec![s]).with_transform(Matrix::scaling(1.0, 2.0, 3.0));
        let g1 = Shape::group(vec![g2]).with_transform(Matrix::rotation_y(PI / 2.0));

        let g2 = &g1.as_group().unwrap().children()[0];
        let s = &g2.as_group().unwrap().children()[0];
        let hit = Intersection::new(1.0, s);
        let n = s.normal_at(point(1.7321, 1.1547, -5.5774), &hit);
        assert_eq!(n, vector(0.28570, 0.42854, -0.85716));
    }

    #[test]
    fn test_parent_space_bounds() {
        let s = Shape::sphere()
            .with_transform(Matrix::translation(1.0, -3.0, 5.0) * Matrix::scaling(0.5, 2.0, 4.0));
        let b = s.parent_space_bounds();
        assert_eq!(b.min, point(0.5, -5.0, 1.0));
        assert_eq!(b.max, point(1.5, -1.0, 9.0));
    }

    #[test]
    fn test_includes() {
        let s = Shape::sphere();
        let other = Shape::sphere();
        assert!(s.includes(&s));
        assert!(!s.includes(&other));

        let g = Shape::group(vec![Shape::cube(), Shape::group(vec![Shape::sphere()])]);
        let nested = &g.as_group().unwrap().children()[1].as_group().unwrap().children()[0];
        assert!(g.includes(nested));
        assert!(!g.includes(&other));
    }

    #[test]
    #[should_panic(expected = "composite")]
    fn test_normal_of_group_panics() {
        let g = Shape::group(vec![Shape::sphere()]);
        let hit = Intersection::new(1.0, &g);
        g.normal_at(point(0.0, 0.0, 0.0), &hit);
    }

    #[test]
    fn test_retransforming_a_group_rebakes_children() {
        let g = Shape::group(vec![Shape::sphere()]).with_transform(Matrix::translation(0.0, 0.0, 10.0));
        let g = g.with_transform(Matrix::translation(0.0, 0.0, 20.0));
        let s = &g.as_group().unwrap().children()[0];
        assert_eq!(s.world_to_object(point(0.0, 0.0, 20.0)), point(0.0, 0.0, 0.0));
    }
}
