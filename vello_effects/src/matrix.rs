// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 3x3 matrix for texture coordinate transforms.

use core::hash::{Hash, Hasher};
use core::ops::Mul;

use peniko::kurbo::{Affine, Point};
use static_assertions::assert_eq_size;

/// A 3x3 transform, possibly with perspective.
///
/// The values are stored row-major:
///
/// ```text
/// | sx kx tx |
/// | ky sy ty |
/// | p0 p1 p2 |
/// ```
///
/// Equality is exact: two matrices are equal only if all nine values have identical bit
/// patterns. Matrices are compared to deduplicate effects built along the same code path,
/// so no tolerance is applied. As a consequence `0.0` and `-0.0` compare unequal, and a
/// matrix containing NaN is still equal to itself.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
#[repr(C)]
pub struct Matrix3 {
    values: [f32; 9],
}

assert_eq_size!(Matrix3, [f32; 9]);

impl Matrix3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        values: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Create a matrix from nine row-major values.
    pub const fn from_row_major(values: [f32; 9]) -> Self {
        Self { values }
    }

    /// A scale matrix.
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            values: [sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// A translation matrix.
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            values: [1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0],
        }
    }

    /// Create a matrix from a kurbo affine transform.
    ///
    /// The coefficients are narrowed to `f32`.
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs().map(|x| x as f32);
        Self {
            values: [a, c, e, b, d, f, 0.0, 0.0, 1.0],
        }
    }

    /// Convert to a kurbo affine transform, or `None` if the matrix has perspective.
    pub fn to_affine(&self) -> Option<Affine> {
        if self.has_perspective() {
            return None;
        }
        let [sx, kx, tx, ky, sy, ty, ..] = self.values.map(f64::from);
        Some(Affine::new([sx, ky, kx, sy, tx, ty]))
    }

    /// The row-major values of this matrix.
    pub fn as_row_major(&self) -> &[f32; 9] {
        &self.values
    }

    /// Whether the bottom row differs from `[0, 0, 1]`.
    pub fn has_perspective(&self) -> bool {
        let [.., p0, p1, p2] = self.values;
        p0 != 0.0 || p1 != 0.0 || p2 != 1.0
    }

    /// Whether this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        self.cheap_eq(&Self::IDENTITY)
    }

    /// Exact comparison of all nine values by bit pattern.
    pub fn cheap_eq(&self, other: &Self) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    /// Returns `self * other`, i.e. `other` is applied first.
    pub fn concat(&self, other: &Self) -> Self {
        let a = &self.values;
        let b = &other.values;
        let mut values = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                values[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self { values }
    }

    /// Map a point through this matrix, including the perspective divide.
    pub fn map_point(&self, point: Point) -> Point {
        let [sx, kx, tx, ky, sy, ty, p0, p1, p2] = self.values.map(f64::from);
        let x = sx * point.x + kx * point.y + tx;
        let y = ky * point.x + sy * point.y + ty;
        let w = p0 * point.x + p1 * point.y + p2;
        if w == 0.0 {
            // Points on the line at infinity have no finite image.
            return Point::new(f64::INFINITY, f64::INFINITY);
        }
        Point::new(x / w, y / w)
    }

    /// The inverse of this matrix, or `None` if it is singular or not finite.
    pub fn invert(&self) -> Option<Self> {
        let [a, b, c, d, e, f, g, h, i] = self.values.map(f64::from);
        // Cofactors of the first row.
        let c00 = e * i - f * h;
        let c01 = f * g - d * i;
        let c02 = d * h - e * g;
        let det = a * c00 + b * c01 + c * c02;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        let adjugate = [
            c00,
            c * h - b * i,
            b * f - c * e,
            c01,
            a * i - c * g,
            c * d - a * f,
            c02,
            b * g - a * h,
            a * e - b * d,
        ];
        let values = adjugate.map(|x| (x * inv_det) as f32);
        if values.iter().all(|x| x.is_finite()) {
            Some(Self { values })
        } else {
            None
        }
    }

    /// The matrix in the layout of a WGSL `mat3x3<f32>` uniform.
    ///
    /// WGSL matrices are column-major and each column is padded to a `vec4`.
    pub fn to_uniform(&self) -> [f32; 12] {
        let [sx, kx, tx, ky, sy, ty, p0, p1, p2] = self.values;
        [sx, ky, p0, 0.0, kx, sy, p1, 0.0, tx, ty, p2, 0.0]
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix3 {
    fn eq(&self, other: &Self) -> bool {
        self.cheap_eq(other)
    }
}

impl Eq for Matrix3 {}

impl Hash for Matrix3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in &self.values {
            value.to_bits().hash(state);
        }
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.concat(&other)
    }
}

impl From<Affine> for Matrix3 {
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}
