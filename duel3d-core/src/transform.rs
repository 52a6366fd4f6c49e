/// 4x4 column-major transformation matrices
use std::ops::Mul;

use nalgebra::Matrix4;

use crate::vector::{difference, unit_vector, Vector};

/// A column-major 4x4 matrix, laid out the way WebGL's `uniformMatrix4fv`
/// expects it: element `(row, col)` lives at index `col * 4 + row`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(pub [f32; 16]);

impl Matrix {
    pub const fn identity() -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub const fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            tx, ty, tz, 1.0,
        ])
    }

    /// Rotation about the x axis (right-handed, radians)
    pub fn x_rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the y axis (right-handed, radians)
    pub fn y_rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the z axis (right-handed, radians)
    pub fn z_rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub const fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self([
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Matrix product `self · other`.
    ///
    /// Applied to a column vector, `other` takes effect first and `self`
    /// second, so chained `translate`/`rotate` calls read in the order the
    /// transforms are written.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let a = &self.0;
        let b = &other.0;
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
            }
        }
        Matrix(out)
    }

    pub fn translate(&self, tx: f32, ty: f32, tz: f32) -> Matrix {
        self.multiply(&Self::translation(tx, ty, tz))
    }

    pub fn x_rotate(&self, angle: f32) -> Matrix {
        self.multiply(&Self::x_rotation(angle))
    }

    pub fn y_rotate(&self, angle: f32) -> Matrix {
        self.multiply(&Self::y_rotation(angle))
    }

    pub fn z_rotate(&self, angle: f32) -> Matrix {
        self.multiply(&Self::z_rotation(angle))
    }

    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Matrix {
        self.multiply(&Self::scaling(sx, sy, sz))
    }

    pub fn transpose(&self) -> Matrix {
        let m = &self.0;
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[row * 4 + col] = m[col * 4 + row];
            }
        }
        Matrix(out)
    }

    /// Rotation by `theta_degrees` about the axis running from `p1` towards `p2`.
    ///
    /// Axes parallel to z, y or x rotate directly about the translated
    /// origin. Any other axis is first tilted onto z by two auxiliary
    /// rotations, rotated, then tilted back. `p1 == p2` has no axis and
    /// yields NaN.
    pub fn rotation_about_axis(p1: &Vector, p2: &Vector, theta_degrees: f32) -> Matrix {
        let theta = theta_degrees.to_radians();
        let [a, b, c] = unit_vector(&difference(p2, p1));

        let to_p1 = Self::translation(p1[0], p1[1], p1[2]);
        let from_p1 = Self::translation(-p1[0], -p1[1], -p1[2]);

        let direct = if a == 0.0 && b == 0.0 {
            Some(Self::z_rotation(theta))
        } else if a == 0.0 && c == 0.0 {
            Some(Self::y_rotation(theta))
        } else if b == 0.0 && c == 0.0 {
            Some(Self::x_rotation(theta))
        } else {
            None
        };
        if let Some(rotation) = direct {
            return to_p1 * rotation * from_p1;
        }

        // Tilt about x into the xz plane, then about y onto z.
        let d = (b * b + c * c).sqrt();
        let rx_alpha = Matrix([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c / d, b / d, 0.0, //
            0.0, -b / d, c / d, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let ry_beta = Matrix([
            d, 0.0, a, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -a, 0.0, d, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);

        to_p1
            * rx_alpha.transpose()
            * ry_beta.transpose()
            * Self::z_rotation(theta)
            * ry_beta
            * rx_alpha
            * from_p1
    }

    /// `self · [x, y, z, 1]`, returned as homogeneous `[x, y, z, w]`
    pub fn transform_point(&self, point: &Vector) -> [f32; 4] {
        let m = &self.0;
        let v = [point[0], point[1], point[2], 1.0];
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|col| m[col * 4 + row] * v[col]).sum();
        }
        out
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}

impl From<Matrix> for Matrix4<f32> {
    fn from(m: Matrix) -> Self {
        Matrix4::from_column_slice(&m.0)
    }
}

impl From<Matrix4<f32>> for Matrix {
    fn from(m: Matrix4<f32>) -> Self {
        let mut out = [0.0; 16];
        out.copy_from_slice(m.as_slice());
        Matrix(out)
    }
}
