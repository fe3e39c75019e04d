//! 4x4 transformation matrices.
//!
//! `Matrix` wraps `glam::DMat4` (column-major internally) but is constructed and
//! indexed row-major, which is how transforms are usually written down.

use std::ops::Mul;

use glam::{DMat4, DVec4};

use crate::{near, Tuple, EPSILON};

#[derive(Debug, Copy, Clone)]
pub struct Matrix(pub DMat4);

impl Matrix {
    pub const IDENTITY: Matrix = Matrix(DMat4::IDENTITY);

    /// Create a matrix from rows.
    pub fn new(rows: [[f64; 4]; 4]) -> Self {
        Self(DMat4::from_cols_array_2d(&rows).transpose())
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0.col(col)[row]
    }

    pub fn transpose(&self) -> Matrix {
        Matrix(self.0.transpose())
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    pub fn invertible(&self) -> bool {
        self.determinant().abs() > EPSILON
    }

    /// Inverse of the matrix.
    ///
    /// A singular matrix is a caller error; the result is then full of
    /// non-finite values.
    pub fn inverse(&self) -> Matrix {
        if !self.invertible() {
            log::warn!("Inverting a singular matrix: {:?}", self.0);
        }
        Matrix(self.0.inverse())
    }

    /// Multiply a tuple, skipping zero coefficients so that `0 * inf`
    /// contributes nothing instead of NaN. Needed for unbounded boxes.
    pub fn mul_finite_safe(&self, t: Tuple) -> Tuple {
        let v = [t.x, t.y, t.z, t.w];
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            for (col, component) in v.iter().enumerate() {
                let m = self.get(row, col);
                if m != 0.0 {
                    *slot += m * component;
                }
            }
        }
        Tuple::new(out[0], out[1], out[2], out[3])
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .to_cols_array()
            .iter()
            .zip(other.0.to_cols_array().iter())
            .all(|(a, b)| near(*a, *b))
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix(self.0 * rhs.0)
    }
}

impl Mul<Tuple> for Matrix {
    type Output = Tuple;

    fn mul(self, rhs: Tuple) -> Tuple {
        Tuple::from(self.0 * DVec4::from(rhs))
    }
}

impl From<DMat4> for Matrix {
    fn from(m: DMat4) -> Self {
        Matrix(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point, vector};

    #[test]
    fn test_row_major_construction() {
        let m = Matrix::new([
            [1.0, 2.0, 3.0, 4.0],
            [5.5, 6.5, 7.5, 8.5],
            [9.0, 10.0, 11.0, 12.0],
            [13.5, 14.5, 15.5, 16.5],
        ]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 3), 4.0);
        assert_eq!(m.get(1, 0), 5.5);
        assert_eq!(m.get(1, 2), 7.5);
        assert_eq!(m.get(3, 2), 15.5);
    }

    #[test]
    fn test_multiply_matrices() {
        let a = Matrix::new([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 8.0, 7.0, 6.0],
            [5.0, 4.0, 3.0, 2.0],
        ]);
        let b = Matrix::new([
            [-2.0, 1.0, 2.0, 3.0],
            [3.0, 2.0, 1.0, -1.0],
            [4.0, 3.0, 6.0, 5.0],
            [1.0, 2.0, 7.0, 8.0],
        ]);
        let expected = Matrix::new([
            [20.0, 22.0, 50.0, 48.0],
            [44.0, 54.0, 114.0, 108.0],
            [40.0, 58.0, 110.0, 102.0],
            [16.0, 26.0, 46.0, 42.0],
        ]);
        assert_eq!(a * b, expected);
    }

    #[test]
    fn test_multiply_tuple() {
        let a = Matrix::new([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 4.0, 2.0],
            [8.0, 6.0, 4.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(a * Tuple::new(1.0, 2.0, 3.0, 1.0), Tuple::new(18.0, 24.0, 33.0, 1.0));
        assert_eq!(Matrix::IDENTITY * vector(1.0, 2.0, 3.0), vector(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transpose() {
        let a = Matrix::new([
            [0.0, 9.0, 3.0, 0.0],
            [9.0, 8.0, 0.0, 8.0],
            [1.0, 8.0, 5.0, 3.0],
            [0.0, 0.0, 5.0, 8.0],
        ]);
        let t = a.transpose();
        assert_eq!(t.get(0, 1), 9.0);
        assert_eq!(t.get(2, 0), 3.0);
        assert_eq!(t.get(3, 1), 8.0);
        assert_eq!(Matrix::IDENTITY.transpose(), Matrix::IDENTITY);
    }

    #[test]
    fn test_determinant_and_invertible() {
        let a = Matrix::new([
            [-2.0, -8.0, 3.0, 5.0],
            [-3.0, 1.0, 7.0, 3.0],
            [1.0, 2.0, -9.0, 6.0],
            [-6.0, 7.0, 7.0, -9.0],
        ]);
        assert!(near(a.determinant(), -4071.0));
        assert!(a.invertible());

        let singular = Matrix::new([
            [-4.0, 2.0, -2.0, -3.0],
            [9.0, 6.0, 2.0, 6.0],
            [0.0, -5.0, 1.0, -5.0],
            [0.0, 0.0, 0.0, 0.0],
        ]);
        assert!(!singular.invertible());
    }

    #[test]
    fn test_inverse() {
        let a = Matrix::new([
            [8.0, -5.0, 9.0, 2.0],
            [7.0, 5.0, 6.0, 1.0],
            [-6.0, 0.0, 9.0, 6.0],
            [-3.0, 0.0, -9.0, -4.0],
        ]);
        let expected = Matrix::new([
            [-0.15385, -0.15385, -0.28205, -0.53846],
            [-0.07692, 0.12308, 0.02564, 0.03077],
            [0.35897, 0.35897, 0.43590, 0.92308],
            [-0.69231, -0.69231, -0.76923, -1.92308],
        ]);
        assert_eq!(a.inverse(), expected);
    }

    #[test]
    fn test_product_times_inverse() {
        let a = Matrix::new([
            [3.0, -9.0, 7.0, 3.0],
            [3.0, -8.0, 2.0, -9.0],
            [-4.0, 4.0, 4.0, 1.0],
            [-6.0, 5.0, -1.0, 1.0],
        ]);
        let b = Matrix::new([
            [8.0, 2.0, 2.0, 2.0],
            [3.0, -1.0, 7.0, 0.0],
            [7.0, 0.0, 5.0, 4.0],
            [6.0, -2.0, 0.0, 5.0],
        ]);
        assert_eq!(a * b * b.inverse(), a);
    }

    #[test]
    fn test_mul_finite_safe_handles_infinity() {
        let m = Matrix::new([
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let p = m.mul_finite_safe(point(f64::INFINITY, 0.0, f64::NEG_INFINITY));
        assert_eq!(p.x, f64::INFINITY);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z, f64::NEG_INFINITY);
    }
}
