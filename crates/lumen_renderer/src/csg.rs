//! Constructive solid geometry.

use lumen_math::{BoundingBox, Ray};

use crate::{Intersection, Shape};

/// Boolean operation combining the two children of a CSG node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CsgOperation {
    Union,
    Intersect,
    Difference,
}

impl CsgOperation {
    /// Whether a hit survives, given which child it belongs to and whether
    /// the ray is currently inside each child.
    pub fn allows(self, left_hit: bool, in_left: bool, in_right: bool) -> bool {
        match self {
            CsgOperation::Union => (left_hit && !in_right) || (!left_hit && !in_left),
            CsgOperation::Intersect => (left_hit && in_right) || (!left_hit && in_left),
            CsgOperation::Difference => (left_hit && !in_right) || (!left_hit && in_left),
        }
    }
}

/// Two shapes combined by a boolean operation.
#[derive(Debug, Clone)]
pub struct Csg {
    pub operation: CsgOperation,
    left: Box<Shape>,
    right: Box<Shape>,
}

impl Csg {
    pub fn new(operation: CsgOperation, left: Shape, right: Shape) -> Self {
        Self {
            operation,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn left(&self) -> &Shape {
        &self.left
    }

    pub fn right(&self) -> &Shape {
        &self.right
    }

    pub(crate) fn children_mut(&mut self) -> (&mut Shape, &mut Shape) {
        (&mut self.left, &mut self.right)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::surrounding(&self.left.parent_space_bounds(), &self.right.parent_space_bounds())
    }

    /// Keep only the intersections lying on the boundary of the combined solid.
    /// `xs` must be sorted by `t`.
    pub fn filter<'a>(&self, xs: Vec<Intersection<'a>>) -> Vec<Intersection<'a>> {
        let mut in_left = false;
        let mut in_right = false;

        let mut result = Vec::with_capacity(xs.len());
        for i in xs {
            let left_hit = self.left.includes(i.shape);
            if self.operation.allows(left_hit, in_left, in_right) {
                result.push(i);
            }
            if left_hit {
                in_left = !in_left;
            } else {
                in_right = !in_right;
            }
        }
        result
    }

    /// Intersect both children with a ray already in this node's space.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        let mut xs = self.left.intersect(ray);
        xs.extend(self.right.intersect(ray));
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        self.filter(xs)
    }

    pub fn divide(self, threshold: usize) -> Csg {
        Csg::new(self.operation, self.left.divide(threshold), self.right.divide(threshold))
    }
}
