use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::DVec4;

/// Tolerance used for every approximate comparison in the renderer.
pub const EPSILON: f64 = 1e-5;

/// Returns true if `a` and `b` are equal within [`EPSILON`].
///
/// Identical values (including matching infinities) always compare equal.
#[inline]
pub fn near(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < EPSILON
}

/// A homogeneous 4-component tuple.
///
/// `w == 1` marks a point, `w == 0` a vector. Equality is approximate, see [`near`].
#[derive(Debug, Copy, Clone)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Shorthand for a point (w = 1).
#[inline]
pub fn point(x: f64, y: f64, z: f64) -> Tuple {
    Tuple::new(x, y, z, 1.0)
}

/// Shorthand for a vector (w = 0).
#[inline]
pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
    Tuple::new(x, y, z, 0.0)
}

impl Tuple {
    pub const ORIGIN: Tuple = Tuple {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn is_point(&self) -> bool {
        near(self.w, 1.0)
    }

    pub fn is_vector(&self) -> bool {
        near(self.w, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn normalize(&self) -> Tuple {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: &Tuple) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Cross product of the xyz parts; the result is always a vector.
    pub fn cross(&self, other: &Tuple) -> Tuple {
        vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Reflects this vector around `normal`.
    pub fn reflect(&self, normal: &Tuple) -> Tuple {
        *self - *normal * 2.0 * self.dot(normal)
    }

    /// Drops `w`, turning the tuple into a vector. Used after multiplying
    /// by an inverse-transpose, which can leave garbage in `w`.
    pub fn to_vector(&self) -> Tuple {
        vector(self.x, self.y, self.z)
    }
}

impl Default for Tuple {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        near(self.x, other.x) && near(self.y, other.y) && near(self.z, other.z) && near(self.w, other.w)
    }
}

impl Eq for Tuple {}

fn quantize(v: f64) -> i64 {
    (v / EPSILON / 5.0).round() as i64
}

impl Hash for Tuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        quantize(self.x).hash(state);
        quantize(self.y).hash(state);
        quantize(self.z).hash(state);
        quantize(self.w).hash(state);
    }
}

impl From<DVec4> for Tuple {
    fn from(v: DVec4) -> Self {
        Tuple::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Tuple> for DVec4 {
    fn from(t: Tuple) -> Self {
        DVec4::new(t.x, t.y, t.z, t.w)
    }
}

impl Add for Tuple {
    type Output = Tuple;

    fn add(self, rhs: Tuple) -> Tuple {
        Tuple::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Tuple {
    type Output = Tuple;

    fn sub(self, rhs: Tuple) -> Tuple {
        Tuple::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for Tuple {
    type Output = Tuple;

    fn neg(self) -> Tuple {
        Tuple::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Tuple {
    type Output = Tuple;

    fn mul(self, rhs: f64) -> Tuple {
        Tuple::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Div<f64> for Tuple {
    type Output = Tuple;

    fn div(self, rhs: f64) -> Tuple {
        Tuple::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}
