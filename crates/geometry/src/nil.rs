//! # Nil geometry
//!
//! The Heisenberg group with law
//! `(a, b, c) * (x, y, z) = (a + x, b + y, c + z + (a y - b x) / 2)`
//! and its left-invariant metric. Points are stored as `(x, y, z, 1)`.
//! Left translations are affine, so they act on homogeneous coordinates as
//! 4x4 matrices. The full isometry group adds rotations about the z-axis.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::isometry::Isometry;
use crate::kind::GeometryKind;
use crate::model::{FlowStrategy, GeometryModel, DEFAULT_EULER_STEP};
use crate::point::Point;

/// Below this value of `|c t|` the closed-form geodesic switches to its series.
const SERIES_CUTOFF: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nil {
    /// Step of the numeric flow used to move the observer.
    pub euler_step: f64,
}

impl Default for Nil {
    fn default() -> Self {
        Self {
            euler_step: DEFAULT_EULER_STEP,
        }
    }
}

impl Nil {
    /// Left translation by the group element `(a, b, c)`.
    #[must_use]
    pub fn left_translation(t: DVec3) -> Isometry {
        Isometry::from_matrix(DMat4::from_cols(
            DVec4::new(1.0, 0.0, -0.5 * t.y, 0.0),
            DVec4::new(0.0, 1.0, 0.5 * t.x, 0.0),
            DVec4::Z,
            t.extend(1.0),
        ))
    }
}

impl GeometryModel for Nil {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Nil
    }

    fn translation_to(&self, p: &Point) -> Isometry {
        Self::left_translation(p.xyz() / p.w())
    }

    fn translation_from(&self, p: &Point) -> Isometry {
        Self::left_translation(-p.xyz() / p.w())
    }

    fn bilinear_form(&self, u: DVec4, v: DVec4) -> f64 {
        u.truncate().dot(v.truncate())
    }

    /// Length of `p^-1 q` in coordinates. Not the Riemannian distance, but
    /// it agrees to first order near `p` and is cheap.
    fn distance(&self, p: &Point, q: &Point) -> f64 {
        let local = self.translation_from(p).apply(q);
        (local.xyz() / local.w()).length()
    }

    fn renormalize_isometry(&self, g: &Isometry) -> Isometry {
        let col0 = g.matrix.x_axis;
        let angle = col0.y.atan2(col0.x);
        let t = g.translation_part();
        let translation = Self::left_translation(t.truncate() / t.w);
        translation.multiply(&Isometry::from_matrix(DMat4::from_rotation_z(angle)))
    }

    fn renormalize_point(&self, p: &Point) -> Point {
        Point::from_coords((p.xyz() / p.w()).extend(1.0))
    }

    fn normalization_defect(&self, p: &Point) -> f64 {
        (p.w() - 1.0).abs()
    }

    fn project_to_model(&self, p: &Point) -> DVec3 {
        p.xyz() / p.w()
    }

    fn point_from_model(&self, k: DVec3) -> Point {
        Point::from_coords(k.extend(1.0))
    }

    fn transport_generator(&self, u: DVec3) -> DMat3 {
        DMat3::from_cols(
            DVec3::new(0.0, 0.5 * u.z, 0.5 * u.y),
            DVec3::new(-0.5 * u.z, 0.0, -0.5 * u.x),
            DVec3::new(-0.5 * u.y, 0.5 * u.x, 0.0),
        )
    }

    fn flow_strategy(&self) -> FlowStrategy {
        FlowStrategy::Euler {
            step: self.euler_step,
        }
    }

    /// Geodesics are helices: the horizontal part of the velocity turns at
    /// rate `c = dir.z` while the vertical part stays constant.
    fn geodesic_from_origin(&self, dir: DVec3, t: f64) -> (Point, DVec3) {
        let c = dir.z;
        let a = (1.0 - c * c).max(0.0).sqrt();
        let alpha = dir.y.atan2(dir.x);
        let ct = c * t;
        let coords = if ct.abs() < SERIES_CUTOFF {
            DVec3::new(
                a * t * alpha.cos(),
                a * t * alpha.sin(),
                ct + a * a * c * t * t * t / 12.0,
            )
        } else {
            let ratio = a / c;
            let chord = 2.0 * ratio * (0.5 * ct).sin();
            DVec3::new(
                chord * (0.5 * ct + alpha).cos(),
                chord * (0.5 * ct + alpha).sin(),
                ct + 0.5 * ratio * ratio * (ct - ct.sin()),
            )
        };
        let end_dir = DVec3::new(a * (ct + alpha).cos(), a * (ct + alpha).sin(), c);
        (Point::from_coords(coords.extend(1.0)), end_dir)
    }
}
