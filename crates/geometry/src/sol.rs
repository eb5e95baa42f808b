//! Sol geometry: the group `R^2 ⋊ R` with law
//! `(a, b, c) * (x, y, z) = (e^c x + a, e^-c y + b, z + c)` and its
//! left-invariant metric `e^-2z dx^2 + e^2z dy^2 + dz^2`.
//!
//! There is no closed form for Sol geodesics in elementary functions, so
//! both rays and the observer move by numeric integration.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::isometry::Isometry;
use crate::kind::GeometryKind;
use crate::model::{FlowStrategy, GeometryModel, DEFAULT_EULER_STEP};
use crate::point::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sol {
    pub euler_step: f64,
}

impl Default for Sol {
    fn default() -> Self {
        Self {
            euler_step: DEFAULT_EULER_STEP,
        }
    }
}

impl Sol {
    /// Left translation by the group element `(a, b, c)`.
    #[must_use]
    pub fn left_translation(t: DVec3) -> Isometry {
        let stretch = t.z.exp();
        Isometry::from_matrix(DMat4::from_cols(
            DVec4::new(stretch, 0.0, 0.0, 0.0),
            DVec4::new(0.0, 1.0 / stretch, 0.0, 0.0),
            DVec4::Z,
            t.extend(1.0),
        ))
    }

    /// Group inverse of the element `(a, b, c)`.
    #[must_use]
    pub fn inverse_element(t: DVec3) -> DVec3 {
        DVec3::new(-(-t.z).exp() * t.x, -t.z.exp() * t.y, -t.z)
    }
}

impl GeometryModel for Sol {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Sol
    }

    fn translation_to(&self, p: &Point) -> Isometry {
        Self::left_translation(p.xyz() / p.w())
    }

    fn translation_from(&self, p: &Point) -> Isometry {
        Self::left_translation(Self::inverse_element(p.xyz() / p.w()))
    }

    fn bilinear_form(&self, u: DVec4, v: DVec4) -> f64 {
        u.truncate().dot(v.truncate())
    }

    /// Coordinate length of `p^-1 q`, a first-order stand-in for the
    /// Riemannian distance.
    fn distance(&self, p: &Point, q: &Point) -> f64 {
        let local = self.translation_from(p).apply(q);
        (local.xyz() / local.w()).length()
    }

    /// Rebuild `T(t) * diag(sx, sy, 1, 1)`, keeping the reflections the
    /// drifted matrix carries in its diagonal signs.
    fn renormalize_isometry(&self, g: &Isometry) -> Isometry {
        let t = g.translation_part();
        let sx = g.matrix.x_axis.x.signum();
        let sy = g.matrix.y_axis.y.signum();
        let reflection = Isometry::from_matrix(DMat4::from_diagonal(DVec4::new(sx, sy, 1.0, 1.0)));
        Self::left_translation(t.truncate() / t.w).multiply(&reflection)
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
            DVec3::new(0.0, 0.0, -u.x),
            DVec3::new(0.0, 0.0, u.y),
            DVec3::new(u.x, -u.y, 0.0),
        )
    }

    fn flow_strategy(&self) -> FlowStrategy {
        FlowStrategy::Euler {
            step: self.euler_step,
        }
    }
}
