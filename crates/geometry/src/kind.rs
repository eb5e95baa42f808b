//! Runtime selection of a geometry.

use std::fmt;
use std::str::FromStr;

use glam::{DMat3, DVec3, DVec4};
use thiserror::Error;

use crate::euclidean::Euclidean;
use crate::hyperbolic::Hyperbolic;
use crate::isometry::Isometry;
use crate::model::{FlowStrategy, GeometryModel};
use crate::nil::Nil;
use crate::point::{Point, Vector};
use crate::sol::Sol;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Euclidean,
    Hyperbolic,
    Nil,
    Sol,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Euclidean,
        GeometryKind::Hyperbolic,
        GeometryKind::Nil,
        GeometryKind::Sol,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Euclidean => "euclidean",
            GeometryKind::Hyperbolic => "hyperbolic",
            GeometryKind::Nil => "nil",
            GeometryKind::Sol => "sol",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown geometry '{0}' (expected one of: euclidean, hyperbolic, nil, sol)")]
pub struct ParseGeometryError(pub String);

impl FromStr for GeometryKind {
    type Err = ParseGeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "e3" => Ok(GeometryKind::Euclidean),
            "hyperbolic" | "h3" => Ok(GeometryKind::Hyperbolic),
            "nil" => Ok(GeometryKind::Nil),
            "sol" => Ok(GeometryKind::Sol),
            _ => Err(ParseGeometryError(s.to_string())),
        }
    }
}

/// Any of the supported models, chosen at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Euclidean(Euclidean),
    Hyperbolic(Hyperbolic),
    Nil(Nil),
    Sol(Sol),
}

impl Geometry {
    /// The model for `kind`, with `euler_step` for the integrated ones.
    #[must_use]
    pub fn new(kind: GeometryKind, euler_step: f64) -> Self {
        match kind {
            GeometryKind::Euclidean => Geometry::Euclidean(Euclidean),
            GeometryKind::Hyperbolic => Geometry::Hyperbolic(Hyperbolic),
            GeometryKind::Nil => Geometry::Nil(Nil { euler_step }),
            GeometryKind::Sol => Geometry::Sol(Sol { euler_step }),
        }
    }
}

impl From<GeometryKind> for Geometry {
    fn from(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Euclidean => Geometry::Euclidean(Euclidean),
            GeometryKind::Hyperbolic => Geometry::Hyperbolic(Hyperbolic),
            GeometryKind::Nil => Geometry::Nil(Nil::default()),
            GeometryKind::Sol => Geometry::Sol(Sol::default()),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $model:ident => $body:expr) => {
        match $self {
            Geometry::Euclidean($model) => $body,
            Geometry::Hyperbolic($model) => $body,
            Geometry::Nil($model) => $body,
            Geometry::Sol($model) => $body,
        }
    };
}

impl GeometryModel for Geometry {
    fn kind(&self) -> GeometryKind {
        delegate!(self, m => m.kind())
    }

    fn invert(&self, g: &Isometry) -> Isometry {
        delegate!(self, m => m.invert(g))
    }

    fn translation_to(&self, p: &Point) -> Isometry {
        delegate!(self, m => m.translation_to(p))
    }

    fn translation_from(&self, p: &Point) -> Isometry {
        delegate!(self, m => m.translation_from(p))
    }

    fn bilinear_form(&self, u: DVec4, v: DVec4) -> f64 {
        delegate!(self, m => m.bilinear_form(u, v))
    }

    fn distance(&self, p: &Point, q: &Point) -> f64 {
        delegate!(self, m => m.distance(p, q))
    }

    fn renormalize_isometry(&self, g: &Isometry) -> Isometry {
        delegate!(self, m => m.renormalize_isometry(g))
    }

    fn renormalize_point(&self, p: &Point) -> Point {
        delegate!(self, m => m.renormalize_point(p))
    }

    fn renormalize_vector(&self, v: &Vector) -> Vector {
        delegate!(self, m => m.renormalize_vector(v))
    }

    fn normalization_defect(&self, p: &Point) -> f64 {
        delegate!(self, m => m.normalization_defect(p))
    }

    fn project_to_model(&self, p: &Point) -> DVec3 {
        delegate!(self, m => m.project_to_model(p))
    }

    fn point_from_model(&self, k: DVec3) -> Point {
        delegate!(self, m => m.point_from_model(k))
    }

    fn transport_generator(&self, u: DVec3) -> DMat3 {
        delegate!(self, m => m.transport_generator(u))
    }

    fn geodesic_field(&self, u: DVec3) -> DVec3 {
        delegate!(self, m => m.geodesic_field(u))
    }

    fn flow_strategy(&self) -> FlowStrategy {
        delegate!(self, m => m.flow_strategy())
    }

    fn geodesic_from_origin(&self, dir: DVec3, t: f64) -> (Point, DVec3) {
        delegate!(self, m => m.geodesic_from_origin(dir, t))
    }

    fn exp_origin(&self, v: DVec3) -> Point {
        delegate!(self, m => m.exp_origin(v))
    }

    fn face_pairing(&self, normal: DVec3, half_width: f64) -> Isometry {
        delegate!(self, m => m.face_pairing(normal, half_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for kind in GeometryKind::ALL {
            let parsed: GeometryKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "spherical".parse::<GeometryKind>().unwrap_err();
        assert_eq!(err, ParseGeometryError("spherical".to_string()));
    }

    #[test]
    fn test_dispatch_uses_model_overrides() {
        let geom = Geometry::from(GeometryKind::Hyperbolic);
        let p = geom.exp_origin(DVec3::new(1.0, 0.0, 0.0));
        assert!((p.w() - 1.0_f64.cosh()).abs() < 1e-12);
    }
}
