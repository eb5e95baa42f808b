//! # Hyperbolic space in the hyperboloid model
//!
//! Points are vectors `p` with `<p, p> = -1` and `w > 0` for the Lorentzian
//! form `<u, v> = u.x v.x + u.y v.y + u.z v.z - u.w v.w`. Isometries are the
//! orthochronous Lorentz transformations. Fundamental domains are described
//! in the projective (Klein) model `xyz / w`, where geodesics are straight
//! segments and polyhedra have flat faces.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::isometry::Isometry;
use crate::kind::GeometryKind;
use crate::model::{FlowStrategy, GeometryModel};
use crate::point::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hyperbolic;

/// Lorentzian inner product with signature `(+, +, +, -)`.
#[must_use]
pub fn lorentz_dot(u: DVec4, v: DVec4) -> f64 {
    u.x * v.x + u.y * v.y + u.z * v.z - u.w * v.w
}

impl Hyperbolic {
    /// Hyperbolic distance from the origin to the point with Klein
    /// coordinate `k`, `|k| < 1`.
    #[must_use]
    pub fn klein_radius_to_distance(radius: f64) -> f64 {
        radius.atanh()
    }

    /// Boost along the unit direction `u` by hyperbolic distance encoded as
    /// `(sinh d, cosh d)`.
    fn boost(u: DVec3, sinh_d: f64, cosh_d: f64) -> Isometry {
        let c2 = cosh_d - 1.0;
        let col = |axis: DVec3, component: f64| (axis + u * (c2 * component)).extend(sinh_d * component);
        Isometry::from_matrix(DMat4::from_cols(
            col(DVec3::X, u.x),
            col(DVec3::Y, u.y),
            col(DVec3::Z, u.z),
            (u * sinh_d).extend(cosh_d),
        ))
    }
}

impl GeometryModel for Hyperbolic {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Hyperbolic
    }

    fn translation_to(&self, p: &Point) -> Isometry {
        let p = self.renormalize_point(p);
        let spatial = p.xyz();
        let sinh_d = spatial.length();
        if sinh_d == 0.0 || !sinh_d.is_finite() {
            return Isometry::IDENTITY;
        }
        Self::boost(spatial / sinh_d, sinh_d, p.w())
    }

    fn translation_from(&self, p: &Point) -> Isometry {
        self.translation_to(&Point::from_coords((-p.xyz()).extend(p.w())))
    }

    fn bilinear_form(&self, u: DVec4, v: DVec4) -> f64 {
        lorentz_dot(u, v)
    }

    fn distance(&self, p: &Point, q: &Point) -> f64 {
        (-lorentz_dot(p.coords, q.coords)).max(1.0).acosh()
    }

    /// Lorentzian Gram-Schmidt on the columns, spacelike columns first and
    /// the timelike column last.
    fn renormalize_isometry(&self, g: &Isometry) -> Isometry {
        let mut cols = [g.matrix.x_axis, g.matrix.y_axis, g.matrix.z_axis, g.matrix.w_axis];
        let signs = [1.0, 1.0, 1.0, -1.0];
        for i in 0..4 {
            for j in 0..i {
                let basis = cols[j];
                let projection = lorentz_dot(cols[i], basis) * signs[j];
                cols[i] -= basis * projection;
            }
            let norm = lorentz_dot(cols[i], cols[i]).abs().sqrt();
            if norm > 0.0 && norm.is_finite() {
                cols[i] /= norm;
            }
        }
        Isometry::from_matrix(DMat4::from_cols(cols[0], cols[1], cols[2], cols[3]))
    }

    /// # Panics
    ///
    /// On a point with zero Lorentzian norm, which has no projection onto
    /// the hyperboloid.
    fn renormalize_point(&self, p: &Point) -> Point {
        let norm = lorentz_dot(p.coords, p.coords).abs().sqrt();
        if !norm.is_finite() {
            return *p;
        }
        assert!(norm > 0.0, "cannot renormalize the degenerate point {p:?}");
        let coords = p.coords / norm;
        Point::from_coords(if coords.w < 0.0 { -coords } else { coords })
    }

    fn normalization_defect(&self, p: &Point) -> f64 {
        (lorentz_dot(p.coords, p.coords) + 1.0).abs()
    }

    fn project_to_model(&self, p: &Point) -> DVec3 {
        p.xyz() / p.w()
    }

    /// Lift a Klein coordinate. Outside the unit ball the result is not finite.
    fn point_from_model(&self, k: DVec3) -> Point {
        let scale = (1.0 - k.length_squared()).sqrt();
        Point::from_coords(k.extend(1.0) / scale)
    }

    fn transport_generator(&self, _u: DVec3) -> DMat3 {
        DMat3::ZERO
    }

    fn flow_strategy(&self) -> FlowStrategy {
        FlowStrategy::ClosedForm
    }

    fn geodesic_from_origin(&self, dir: DVec3, t: f64) -> (Point, DVec3) {
        (Point::from_coords((dir * t.sinh()).extend(t.cosh())), dir)
    }

    fn exp_origin(&self, v: DVec3) -> Point {
        let d = v.length();
        if d == 0.0 {
            return Point::ORIGIN;
        }
        Point::from_coords((v / d * d.sinh()).extend(d.cosh()))
    }

    fn face_pairing(&self, normal: DVec3, half_width: f64) -> Isometry {
        let d = 2.0 * Self::klein_radius_to_distance(half_width);
        self.translation_to(&self.exp_origin(normal * d))
    }
}
