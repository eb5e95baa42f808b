//! # The model contract
//!
//! [`GeometryModel`] is the seam between the renderer and a concrete
//! Thurston geometry. A model fixes:
//!
//! - how isometries, points and vectors are encoded (4x4 matrices,
//!   homogeneous 4-vectors, directions in the frame at a point);
//! - how to get from the origin to any point (`translation_to`);
//! - how geodesics leave the origin (`geodesic_from_origin`);
//! - how tangent frames move along geodesics (`transport_generator`);
//! - how to keep all of the above on the group under round-off.
//!
//! Everything else (acting on vectors, marching along a ray, normals,
//! directions to lights) is derived once in this module from those
//! primitives.

use glam::{DMat3, DVec3, DVec4};

use crate::flow::euler_flow;
use crate::isometry::Isometry;
use crate::kind::GeometryKind;
use crate::point::{Point, Vector};

/// Step used when a closed-form model is asked for numeric integration.
pub const DEFAULT_EULER_STEP: f64 = 0.1;

/// How a model integrates motion along geodesics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlowStrategy {
    /// `translation_to(exp_origin(v))` moves along the geodesic and carries
    /// the frame with it; no integration needed.
    ClosedForm,
    /// The geodesic flow is integrated with fixed-size explicit Euler steps.
    Euler { step: f64 },
}

/// One model of a Thurston geometry.
pub trait GeometryModel: Send + Sync {
    fn kind(&self) -> GeometryKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn origin(&self) -> Point {
        Point::ORIGIN
    }

    fn identity(&self) -> Isometry {
        Isometry::IDENTITY
    }

    /// `a * b`.
    fn compose(&self, a: &Isometry, b: &Isometry) -> Isometry {
        a.multiply(b)
    }

    fn invert(&self, g: &Isometry) -> Isometry {
        self.renormalize_isometry(&g.inverse())
    }

    /// A preferred isometry sending the origin to `p`.
    fn translation_to(&self, p: &Point) -> Isometry;

    /// A preferred isometry sending `p` to the origin.
    fn translation_from(&self, p: &Point) -> Isometry {
        self.invert(&self.translation_to(p))
    }

    /// The ambient bilinear form used to normalize points.
    fn bilinear_form(&self, u: DVec4, v: DVec4) -> f64;

    fn distance(&self, p: &Point, q: &Point) -> f64;

    /// Project a matrix that drifted from the group back onto it.
    fn renormalize_isometry(&self, g: &Isometry) -> Isometry;

    /// Project a point that drifted from the model back onto it.
    fn renormalize_point(&self, p: &Point) -> Point;

    fn renormalize_vector(&self, v: &Vector) -> Vector {
        Vector::new(self.renormalize_point(&v.pos), v.dir)
    }

    /// How far `p` is from satisfying the model's normalization.
    fn normalization_defect(&self, p: &Point) -> f64;

    /// Coordinates in which fundamental domains are convex polyhedra.
    fn project_to_model(&self, p: &Point) -> DVec3;

    /// Inverse of [`GeometryModel::project_to_model`].
    fn point_from_model(&self, k: DVec3) -> Point;

    /// Generator `A(u)` of frame transport: along a geodesic with unit
    /// velocity `u`, a frame vector `w` evolves as `w' = A(u) w`.
    fn transport_generator(&self, u: DVec3) -> DMat3;

    /// Acceleration of a geodesic in the moving frame.
    fn geodesic_field(&self, u: DVec3) -> DVec3 {
        self.transport_generator(u) * u
    }

    fn flow_strategy(&self) -> FlowStrategy;

    /// Point reached after travelling `t` along the geodesic leaving the
    /// origin with unit direction `dir`, and the unit tangent there.
    fn geodesic_from_origin(&self, dir: DVec3, t: f64) -> (Point, DVec3) {
        let step = match self.flow_strategy() {
            FlowStrategy::Euler { step } => step,
            FlowStrategy::ClosedForm => DEFAULT_EULER_STEP,
        };
        let (dir, t, sign) = if t < 0.0 { (-dir, -t, -1.0) } else { (dir, t, 1.0) };
        let (boost, _, end_dir) = euler_flow(self, &Isometry::IDENTITY, &DMat3::IDENTITY, dir * t, step);
        (self.renormalize_point(&boost.apply(&Point::ORIGIN)), end_dir * sign)
    }

    /// Riemannian exponential at the origin.
    fn exp_origin(&self, v: DVec3) -> Point {
        let length = v.length();
        if length == 0.0 {
            return self.origin();
        }
        self.geodesic_from_origin(v / length, length).0
    }

    /// Isometry gluing the face with outward model-space normal `normal` at
    /// offset `half_width` onto the opposite face.
    fn face_pairing(&self, normal: DVec3, half_width: f64) -> Isometry {
        self.translation_to(&self.point_from_model(normal * (2.0 * half_width)))
    }
}

/// `g * p`, renormalized.
pub fn apply_to_point<G: GeometryModel + ?Sized>(geom: &G, g: &Isometry, p: &Point) -> Point {
    geom.renormalize_point(&g.apply(p))
}

/// Push a tangent vector forward along `g`.
///
/// The direction is re-expressed in the frame at the image point, which
/// amounts to the linear part of `translation_from(g p) * g * translation_to(p)`.
pub fn apply_to_vector<G: GeometryModel + ?Sized>(geom: &G, g: &Isometry, v: &Vector) -> Vector {
    let pos = apply_to_point(geom, g, &v.pos);
    let holonomy = geom
        .translation_from(&pos)
        .multiply(g)
        .multiply(&geom.translation_to(&v.pos));
    Vector::new(pos, holonomy.linear_part() * v.dir)
}

/// Follow the geodesic tangent to `v` for arc length `t`.
///
/// The returned vector is the unit tangent at the end point.
pub fn geodesic<G: GeometryModel + ?Sized>(geom: &G, v: &Vector, t: f64) -> Vector {
    let (end, dir) = geom.geodesic_from_origin(v.dir.normalize_or_zero(), t);
    apply_to_vector(geom, &geom.translation_to(&v.pos), &Vector::new(end, dir))
}

/// Unit direction at `from` pointing towards `to`.
///
/// Exact where geodesics from the origin are straight lines in the
/// coordinates (Euclidean, hyperbolic), a first-order approximation
/// elsewhere.
pub fn direction_to<G: GeometryModel + ?Sized>(geom: &G, from: &Point, to: &Point) -> DVec3 {
    let local = geom.translation_from(from).apply(to);
    local.xyz().normalize_or_zero()
}

/// Orthonormal frame at `p`.
///
/// Every model uses the left-invariant frame, the origin's axes carried to
/// `p` by `translation_to(p)`. In the direction coordinates of a [`Vector`]
/// it is therefore the same at every point, for every geometry.
#[must_use]
pub fn frame(p: &Point) -> [Vector; 3] {
    [
        Vector::new(*p, DVec3::X),
        Vector::new(*p, DVec3::Y),
        Vector::new(*p, DVec3::Z),
    ]
}

/// Move `p` by the small displacement `dp` expressed in the frame at `p`.
pub fn small_shift<G: GeometryModel + ?Sized>(geom: &G, p: &Point, dp: DVec3) -> Point {
    apply_to_point(geom, &geom.translation_to(p), &geom.point_from_model(dp))
}

/// Unit gradient of `field` at `p` by central differences in the frame at `p`.
pub fn gradient<G, F>(geom: &G, p: &Point, eps: f64, field: F) -> Vector
where
    G: GeometryModel + ?Sized,
    F: Fn(&Point) -> f64,
{
    let mut grad = DVec3::ZERO;
    for (i, axis) in frame(p).iter().enumerate() {
        let forward = field(&small_shift(geom, p, axis.dir * eps));
        let backward = field(&small_shift(geom, p, axis.dir * -eps));
        grad[i] = forward - backward;
    }
    Vector::new(*p, grad.normalize_or_zero())
}
