//! Groups of shapes and bounding volume hierarchy construction.
//!
//! A group's bounds are the union of its children's bounds in the group's own
//! space. `divide` turns a flat list into nested sub-groups by repeatedly
//! splitting the bounds in half along the longest axis.

use lumen_math::{BoundingBox, Ray};

use crate::{Intersection, Shape};

/// Ordered list of child shapes sharing a transform.
#[derive(Debug, Clone, Default)]
pub struct Group {
    children: Vec<Shape>,
}

impl Group {
    pub fn new(children: Vec<Shape>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Shape] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Union of the children's parent-space bounds.
    pub fn bounds(&self) -> BoundingBox {
        let mut b = BoundingBox::empty();
        for child in &self.children {
            b.merge(&child.parent_space_bounds());
        }
        b
    }

    /// Intersect every child with a ray already in group space.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        self.children.iter().flat_map(|child| child.intersect(ray)).collect()
    }

    /// Split the children into those fully inside the left half of the
    /// bounds, those fully inside the right half, and the rest.
    pub fn partition(children: Vec<Shape>) -> (Vec<Shape>, Vec<Shape>, Vec<Shape>) {
        let mut bounds = BoundingBox::empty();
        for child in &children {
            bounds.merge(&child.parent_space_bounds());
        }
        let (left_box, right_box) = bounds.split();

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut remainder = Vec::new();
        for child in children {
            let child_bounds = child.parent_space_bounds();
            if left_box.contains_box(&child_bounds) {
                left.push(child);
            } else if right_box.contains_box(&child_bounds) {
                right.push(child);
            } else {
                remainder.push(child);
            }
        }
        (left, right, remainder)
    }

    /// Subdivide if there are more than `threshold` children, then recurse
    /// into every child.
    pub fn divide(self, threshold: usize) -> Group {
        let mut children = self.children;
        if children.len() > threshold {
            children = subdivide(children);
        }
        Group::new(children.into_iter().map(|child| child.divide(threshold)).collect())
    }
}

/// One level of partitioning.
///
/// A half holding several children becomes a sub-group; a half holding one
/// child keeps it as is. When that would not change the structure (every
/// child lands in the same bucket, or neither half gets more than one), the
/// children are returned untouched so the process terminates.
fn subdivide(children: Vec<Shape>) -> Vec<Shape> {
    let total = children.len();
    let (left, right, remainder) = Group::partition(children);

    let all_in_one = left.len() == total || right.len() == total || remainder.len() == total;
    if all_in_one || (left.len() <= 1 && right.len() <= 1) {
        let mut children = left;
        children.extend(right);
        children.extend(remainder);
        return children;
    }

    log::debug!(
        "Partitioned {} children: {} left, {} right, {} straddling",
        total,
        left.len(),
        right.len(),
        remainder.len()
    );

    let mut result = Vec::with_capacity(remainder.len() + 2);
    for half in [left, right] {
        match half.len() {
            0 => {}
            1 => result.extend(half),
            _ => result.push(Shape::group(half)),
        }
    }
    result.extend(remainder);
    result
}
