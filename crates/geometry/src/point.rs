//! Points and tangent vectors.

use glam::{DVec3, DVec4};

/// A point of the model space in homogeneous coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub coords: DVec4,
}

impl Point {
    /// The reference point `(0, 0, 0, 1)` shared by every model in this crate.
    pub const ORIGIN: Self = Self {
        coords: DVec4::new(0.0, 0.0, 0.0, 1.0),
    };

    #[must_use]
    pub const fn from_coords(coords: DVec4) -> Self {
        Self { coords }
    }

    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::from_coords(DVec4::new(x, y, z, w))
    }

    /// Spatial part of the coordinates.
    #[must_use]
    pub fn xyz(&self) -> DVec3 {
        self.coords.truncate()
    }

    #[must_use]
    pub fn w(&self) -> f64 {
        self.coords.w
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coords.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A tangent vector: a base point and a direction.
///
/// `dir` is expressed in the frame at `pos` obtained by pulling the reference
/// frame at the origin along the model's `translation_to(pos)`. In that frame
/// the metric is the standard dot product, so lengths and angles of `dir` are
/// the Euclidean ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub pos: Point,
    pub dir: DVec3,
}

impl Vector {
    #[must_use]
    pub const fn new(pos: Point, dir: DVec3) -> Self {
        Self { pos, dir }
    }

    /// A vector based at the origin.
    #[must_use]
    pub const fn at_origin(dir: DVec3) -> Self {
        Self::new(Point::ORIGIN, dir)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.dir.length()
    }

    /// Same base point, unit direction. A zero direction stays zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(self.pos, self.dir.normalize_or_zero())
    }

    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.pos, self.dir * factor)
    }

    /// Inner product with another vector at the same base point.
    #[must_use]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.dir.dot(other.dir)
    }
}
