//! Signed distance primitives and their combinators.

use geometry::{gradient, lorentz_dot, GeometryKind, GeometryModel, Point, Vector};
use glam::DVec3;

use crate::error::SceneError;
use crate::uniforms::{narrow, UniformValue};

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Geodesic ball.
    Ball { center: Point, radius: f64 },
    /// Horoball centred at the ideal point in direction `ideal`, bounded by
    /// the level `offset` of the Busemann function `ln(-<p, (ideal, 1)>)`.
    Horoball { ideal: DVec3, offset: f64 },
    Complement(Box<Shape>),
    Union(Box<Shape>, Box<Shape>),
    Intersection(Box<Shape>, Box<Shape>),
    /// The inner shape evaluated on `(|x|, |y|, |z|)`, repeating it in every
    /// octant.
    Mirrored(Box<Shape>),
}

impl Shape {
    #[must_use]
    pub fn ball(center: Point, radius: f64) -> Self {
        Shape::Ball { center, radius }
    }

    /// Horoball towards `ideal`, which is normalized here.
    #[must_use]
    pub fn horoball(ideal: DVec3, offset: f64) -> Self {
        Shape::Horoball {
            ideal: ideal.normalize_or_zero(),
            offset,
        }
    }

    #[must_use]
    pub fn complement(self) -> Self {
        Shape::Complement(Box::new(self))
    }

    #[must_use]
    pub fn union(self, other: Shape) -> Self {
        Shape::Union(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn intersection(self, other: Shape) -> Self {
        Shape::Intersection(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn mirrored(self) -> Self {
        Shape::Mirrored(Box::new(self))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Ball { .. } => "ball",
            Shape::Horoball { .. } => "horoball",
            Shape::Complement(_) => "complement",
            Shape::Union(..) => "union",
            Shape::Intersection(..) => "intersection",
            Shape::Mirrored(_) => "mirrored",
        }
    }

    pub fn sdf<G: GeometryModel + ?Sized>(&self, geom: &G, p: &Point) -> f64 {
        match self {
            Shape::Ball { center, radius } => geom.distance(center, p) - radius,
            Shape::Horoball { ideal, offset } => {
                (-lorentz_dot(p.coords, ideal.extend(1.0))).ln() - offset
            }
            Shape::Complement(inner) => -inner.sdf(geom, p),
            Shape::Union(a, b) => a.sdf(geom, p).min(b.sdf(geom, p)),
            Shape::Intersection(a, b) => a.sdf(geom, p).max(b.sdf(geom, p)),
            Shape::Mirrored(inner) => {
                let folded = Point::from_coords(p.xyz().abs().extend(p.w()));
                inner.sdf(geom, &folded)
            }
        }
    }

    /// Outward unit normal at `p`, by central differences of step `eps`.
    pub fn gradient<G: GeometryModel + ?Sized>(&self, geom: &G, p: &Point, eps: f64) -> Vector {
        gradient(geom, p, eps, |q| self.sdf(geom, q))
    }

    /// Check that every primitive makes sense in `kind` space.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidRadius`] for a non-positive ball radius,
    /// [`SceneError::UnsupportedShape`] for horoballs outside hyperbolic
    /// space and mirroring where coordinate reflections are not isometries.
    pub fn validate(&self, kind: GeometryKind) -> Result<(), SceneError> {
        match self {
            Shape::Ball { radius, .. } => {
                if *radius > 0.0 && radius.is_finite() {
                    Ok(())
                } else {
                    Err(SceneError::InvalidRadius(*radius))
                }
            }
            Shape::Horoball { .. } if kind != GeometryKind::Hyperbolic => Err(SceneError::UnsupportedShape {
                shape: self.name(),
                geometry: kind,
            }),
            Shape::Horoball { .. } => Ok(()),
            Shape::Complement(inner) => inner.validate(kind),
            Shape::Union(a, b) | Shape::Intersection(a, b) => {
                a.validate(kind)?;
                b.validate(kind)
            }
            Shape::Mirrored(inner) => match kind {
                GeometryKind::Euclidean | GeometryKind::Hyperbolic => inner.validate(kind),
                GeometryKind::Nil | GeometryKind::Sol => Err(SceneError::UnsupportedShape {
                    shape: self.name(),
                    geometry: kind,
                }),
            },
        }
    }

    /// Append the constants this shape's distance function needs, named
    /// under `prefix`. Operands of a combinator get `_0` / `_1` suffixes.
    pub fn collect_uniforms(&self, prefix: &str, out: &mut Vec<(String, UniformValue)>) {
        match self {
            Shape::Ball { center, radius } => {
                out.push((format!("{prefix}_center"), UniformValue::Vec4(center.coords.as_vec4().to_array())));
                out.push((format!("{prefix}_radius"), UniformValue::Float(narrow(*radius))));
            }
            Shape::Horoball { ideal, offset } => {
                out.push((format!("{prefix}_ideal"), UniformValue::Vec3(ideal.as_vec3().to_array())));
                out.push((format!("{prefix}_offset"), UniformValue::Float(narrow(*offset))));
            }
            Shape::Complement(inner) | Shape::Mirrored(inner) => inner.collect_uniforms(prefix, out),
            Shape::Union(a, b) | Shape::Intersection(a, b) => {
                a.collect_uniforms(&format!("{prefix}_0"), out);
                b.collect_uniforms(&format!("{prefix}_1"), out);
            }
        }
    }
}
