//! Ray/shape intersections and the per-hit values shading needs.

use std::ptr;

use lumen_math::{Ray, Tuple, EPSILON};

use crate::Shape;

/// A single ray/shape intersection.
///
/// `u`/`v` are barycentric coordinates for triangle hits and zero otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    pub t: f64,
    pub shape: &'a Shape,
    pub u: f64,
    pub v: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, shape: &'a Shape) -> Self {
        Self { t, shape, u: 0.0, v: 0.0 }
    }

    pub fn with_uv(t: f64, shape: &'a Shape, u: f64, v: f64) -> Self {
        Self { t, shape, u, v }
    }
}

/// The visible intersection: lowest non-negative `t`.
pub fn hit<'a, 'b>(xs: &'b [Intersection<'a>]) -> Option<&'b Intersection<'a>> {
    hit_index(xs).map(|i| &xs[i])
}

/// Position of the visible intersection in `xs`.
pub fn hit_index(xs: &[Intersection]) -> Option<usize> {
    xs.iter()
        .enumerate()
        .filter(|(_, i)| i.t >= 0.0)
        .min_by(|(_, a), (_, b)| a.t.total_cmp(&b.t))
        .map(|(index, _)| index)
}

/// Values derived from one intersection that shading reuses.
#[derive(Debug, Clone, Copy)]
pub struct Computations<'a> {
    pub t: f64,
    pub shape: &'a Shape,
    pub point: Tuple,
    pub eyev: Tuple,
    /// Surface normal, flipped to face the eye
    pub normalv: Tuple,
    /// Whether the ray started inside the shape
    pub inside: bool,
    pub reflectv: Tuple,
    /// `point` nudged above the surface, for shadow and reflection rays
    pub over_point: Tuple,
    /// `point` nudged below the surface, for refraction rays
    pub under_point: Tuple,
    /// Refractive index on the side the ray comes from
    pub n1: f64,
    /// Refractive index on the side the ray enters
    pub n2: f64,
}

impl<'a> Computations<'a> {
    /// Prepare `xs[index]`. `xs` must be the full sorted intersection list
    /// for `ray`; refractive indices are found by tracking which shapes the
    /// ray is inside at that point.
    pub fn prepare(xs: &[Intersection<'a>], index: usize, ray: &Ray) -> Self {
        let hit = xs[index];
        let point = ray.at(hit.t);
        let eyev = -ray.direction;
        let mut normalv = hit.shape.normal_at(point, &hit);

        let inside = normalv.dot(&eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        let reflectv = ray.direction.reflect(&normalv);
        let over_point = point + normalv * EPSILON;
        let under_point = point - normalv * EPSILON;

        let (n1, n2) = refractive_indices(xs, index);

        Self {
            t: hit.t,
            shape: hit.shape,
            point,
            eyev,
            normalv,
            inside,
            reflectv,
            over_point,
            under_point,
            n1,
            n2,
        }
    }

    /// Fraction of light reflected at this surface (Schlick's approximation).
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(&self.normalv);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

fn top(containers: &[&Shape]) -> f64 {
    containers
        .last()
        .map(|s| s.material.refractive_index)
        .unwrap_or(1.0)
}

fn refractive_indices(xs: &[Intersection], index: usize) -> (f64, f64) {
    let mut containers: Vec<&Shape> = Vec::new();
    let mut n1 = 1.0;
    for (i, x) in xs.iter().enumerate() {
        if i == index {
            n1 = top(&containers);
        }

        match containers.iter().position(|s| ptr::eq(*s, x.shape)) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(x.shape),
        }

        if i == index {
            return (n1, top(&containers));
        }
    }
    (n1, 1.0)
}
