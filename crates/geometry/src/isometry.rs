//! Isometries as 4x4 matrices acting on homogeneous coordinates.
//!
//! Every model in this crate represents its isometry group inside `GL(4)`,
//! so composition, inversion and the action on points are plain matrix
//! operations. Keeping the matrix a valid group element is the job of the
//! model's `renormalize_isometry`, not of this type.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::point::Point;

/// An element of the isometry group of a geometric model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Isometry {
    pub matrix: DMat4,
}

impl Default for Isometry {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Isometry {
    pub const IDENTITY: Self = Self {
        matrix: DMat4::IDENTITY,
    };

    #[must_use]
    pub const fn from_matrix(matrix: DMat4) -> Self {
        Self { matrix }
    }

    /// `self * other`: first apply `other`, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &Isometry) -> Isometry {
        Isometry::from_matrix(self.matrix * other.matrix)
    }

    /// `other * self`: first apply `self`, then `other`.
    #[must_use]
    pub fn premultiply(&self, other: &Isometry) -> Isometry {
        Isometry::from_matrix(other.matrix * self.matrix)
    }

    /// Raw matrix inverse, without any correction.
    #[must_use]
    pub fn inverse(&self) -> Isometry {
        Isometry::from_matrix(self.matrix.inverse())
    }

    /// Apply the matrix to a point. The result is not renormalized.
    #[must_use]
    pub fn apply(&self, point: &Point) -> Point {
        Point::from_coords(self.matrix * point.coords)
    }

    /// Apply the matrix to a direction (homogeneous coordinate 0).
    #[must_use]
    pub fn apply_direction(&self, dir: DVec3) -> DVec3 {
        (self.matrix * dir.extend(0.0)).truncate()
    }

    /// Upper-left 3x3 block. For an isometry fixing the origin this is its
    /// differential at the origin, written in the reference frame.
    #[must_use]
    pub fn linear_part(&self) -> DMat3 {
        DMat3::from_mat4(self.matrix)
    }

    /// Image of the origin.
    #[must_use]
    pub fn translation_part(&self) -> DVec4 {
        self.matrix.w_axis
    }

    #[must_use]
    pub fn abs_diff_eq(&self, other: &Isometry, max_abs_diff: f64) -> bool {
        self.matrix.abs_diff_eq(other.matrix, max_abs_diff)
    }

    /// Largest absolute entry of `self - other`.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Isometry) -> f64 {
        let a = self.matrix.to_cols_array();
        let b = other.matrix.to_cols_array();
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    /// Column-major `f32` copy of the matrix, the layout shaders expect.
    #[must_use]
    pub fn to_f32_cols(&self) -> [[f32; 4]; 4] {
        split_matrix(self.matrix).0
    }

    /// Split the matrix into a high `f32` part and the `f32` residual, so that
    /// `hi + lo` carries roughly twice the precision of a single `f32`.
    #[must_use]
    pub fn split_f32(&self) -> ([[f32; 4]; 4], [[f32; 4]; 4]) {
        split_matrix(self.matrix)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn split_matrix(matrix: DMat4) -> ([[f32; 4]; 4], [[f32; 4]; 4]) {
    let cols = matrix.to_cols_array_2d();
    let mut hi = [[0.0_f32; 4]; 4];
    let mut lo = [[0.0_f32; 4]; 4];
    for (c, col) in cols.iter().enumerate() {
        for (r, value) in col.iter().enumerate() {
            let high = *value as f32;
            hi[c][r] = high;
            lo[c][r] = (*value - f64::from(high)) as f32;
        }
    }
    (hi, lo)
}
