//! Euclidean space `E^3` in homogeneous coordinates `(x, y, z, 1)`.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::flow::gram_schmidt;
use crate::isometry::Isometry;
use crate::kind::GeometryKind;
use crate::model::{FlowStrategy, GeometryModel};
use crate::point::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Euclidean;

impl GeometryModel for Euclidean {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Euclidean
    }

    fn translation_to(&self, p: &Point) -> Isometry {
        Isometry::from_matrix(DMat4::from_translation(p.xyz() / p.w()))
    }

    fn translation_from(&self, p: &Point) -> Isometry {
        Isometry::from_matrix(DMat4::from_translation(-p.xyz() / p.w()))
    }

    fn bilinear_form(&self, u: DVec4, v: DVec4) -> f64 {
        u.truncate().dot(v.truncate())
    }

    fn distance(&self, p: &Point, q: &Point) -> f64 {
        (p.xyz() / p.w()).distance(q.xyz() / q.w())
    }

    fn renormalize_isometry(&self, g: &Isometry) -> Isometry {
        let rotation = gram_schmidt(&g.linear_part());
        let translation = g.translation_part();
        let translation = translation.truncate() / translation.w;
        Isometry::from_matrix(DMat4::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            rotation.z_axis.extend(0.0),
            translation.extend(1.0),
        ))
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

    fn transport_generator(&self, _u: DVec3) -> DMat3 {
        DMat3::ZERO
    }

    fn flow_strategy(&self) -> FlowStrategy {
        FlowStrategy::ClosedForm
    }

    fn geodesic_from_origin(&self, dir: DVec3, t: f64) -> (Point, DVec3) {
        (Point::from_coords((dir * t).extend(1.0)), dir)
    }

    fn exp_origin(&self, v: DVec3) -> Point {
        Point::from_coords(v.extend(1.0))
    }
}
