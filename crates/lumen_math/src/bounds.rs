use crate::{point, Interval, Matrix, Ray, Tuple};

/// Axis-aligned bounding box used to cull group and CSG subtrees.
///
/// An empty box has `min = +inf` and `max = -inf` on every axis, so adding any
/// point to it produces a degenerate box around that point. Unbounded shapes
/// (planes) use infinite extents.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Tuple,
    pub max: Tuple,
}

impl BoundingBox {
    /// A box containing nothing.
    pub fn empty() -> Self {
        let Interval { min, max } = Interval::EMPTY;
        Self {
            min: point(min, min, min),
            max: point(max, max, max),
        }
    }

    /// Create a box from its two extreme corners.
    pub fn new(min: Tuple, max: Tuple) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include `p`.
    pub fn add_point(&mut self, p: Tuple) {
        self.min = point(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = point(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    /// Grow the box to include `other`. Merging an empty box is a no-op.
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.add_point(other.min);
        self.add_point(other.max);
    }

    /// Box surrounding two other boxes.
    pub fn surrounding(a: &BoundingBox, b: &BoundingBox) -> BoundingBox {
        let mut result = *a;
        result.merge(b);
        result
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Tuple) -> bool {
        self.axis(0).contains(p.x) && self.axis(1).contains(p.y) && self.axis(2).contains(p.z)
    }

    /// True if `other` lies entirely inside this box (boundaries count).
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Extent along an axis (0=X, 1=Y, 2=Z).
    pub fn axis(&self, n: usize) -> Interval {
        match n {
            0 => Interval::new(self.min.x, self.max.x),
            1 => Interval::new(self.min.y, self.max.y),
            _ => Interval::new(self.min.z, self.max.z),
        }
    }

    /// Bounding box of all 8 corners after applying `m`.
    ///
    /// Zero matrix entries are skipped so that infinite extents do not turn
    /// into NaN.
    pub fn transform(&self, m: &Matrix) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }
        let (lo, hi) = (self.min, self.max);
        let corners = [
            point(lo.x, lo.y, lo.z),
            point(lo.x, lo.y, hi.z),
            point(lo.x, hi.y, lo.z),
            point(lo.x, hi.y, hi.z),
            point(hi.x, lo.y, lo.z),
            point(hi.x, lo.y, hi.z),
            point(hi.x, hi.y, lo.z),
            point(hi.x, hi.y, hi.z),
        ];

        let mut result = BoundingBox::empty();
        for corner in corners {
            result.add_point(m.mul_finite_safe(corner));
        }
        result
    }

    /// Slab test against the ray.
    pub fn is_intersected_by(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }
        let tx = Interval::slab(ray.origin.x, ray.direction.x, self.axis(0));
        let ty = Interval::slab(ray.origin.y, ray.direction.y, self.axis(1));
        let tz = Interval::slab(ray.origin.z, ray.direction.z, self.axis(2));

        let tmin = tx.min.max(ty.min).max(tz.min);
        let tmax = tx.max.min(ty.max).min(tz.max);
        tmin <= tmax
    }

    /// Split into two halves across the midpoint of the largest extent.
    /// Ties prefer x, then y, then z.
    pub fn split(&self) -> (BoundingBox, BoundingBox) {
        let dx = self.axis(0).size();
        let dy = self.axis(1).size();
        let dz = self.axis(2).size();
        let greatest = dx.max(dy).max(dz);

        let (mut x0, mut y0, mut z0) = (self.min.x, self.min.y, self.min.z);
        let (mut x1, mut y1, mut z1) = (self.max.x, self.max.y, self.max.z);

        if greatest == dx {
            x0 = self.axis(0).midpoint();
            x1 = x0;
        } else if greatest == dy {
            y0 = self.axis(1).midpoint();
            y1 = y0;
        } else {
            z0 = self.axis(2).midpoint();
            z1 = z0;
        }

        let left = BoundingBox::new(self.min, point(x1, y1, z1));
        let right = BoundingBox::new(point(x0, y0, z0), self.max);
        (left, right)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
