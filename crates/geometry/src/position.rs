//! # Observer position
//!
//! A [`Position`] is a boost (isometry moving the origin to the observer's
//! location) together with a facing (rotation of the reference frame at
//! the origin). The observer sits at `boost * origin` and looks along
//! `facing * (0, 0, -1)`, expressed in the reference frame carried there
//! by the boost.

use glam::{DMat3, DVec3};

use crate::flow::{euler_flow, gram_schmidt};
use crate::isometry::Isometry;
use crate::model::{apply_to_point, apply_to_vector, FlowStrategy, GeometryModel};
use crate::point::{Point, Vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub boost: Isometry,
    pub facing: DMat3,
}

impl Default for Position {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Position {
    pub const IDENTITY: Self = Self {
        boost: Isometry::IDENTITY,
        facing: DMat3::IDENTITY,
    };

    #[must_use]
    pub const fn new(boost: Isometry, facing: DMat3) -> Self {
        Self { boost, facing }
    }

    /// Where the observer is.
    #[must_use]
    pub fn observer_point<G: GeometryModel + ?Sized>(&self, geom: &G) -> Point {
        apply_to_point(geom, &self.boost, &geom.origin())
    }

    /// `(g1, m1) * (g2, m2) = (g1 g2, m2 m1)`.
    #[must_use]
    pub fn multiply(&self, other: &Position) -> Position {
        Position::new(self.boost.multiply(&other.boost), other.facing * self.facing)
    }

    /// `other * self`.
    #[must_use]
    pub fn premultiply(&self, other: &Position) -> Position {
        other.multiply(self)
    }

    #[must_use]
    pub fn inverse<G: GeometryModel + ?Sized>(&self, geom: &G) -> Position {
        Position::new(geom.invert(&self.boost), self.facing.transpose())
    }

    /// Left action of an isometry on the boost; the facing is untouched.
    #[must_use]
    pub fn apply_isometry(&self, g: &Isometry) -> Position {
        Position::new(self.boost.premultiply(g), self.facing)
    }

    /// Right-multiply the facing by `m`: rotate in the observer's own frame.
    #[must_use]
    pub fn apply_facing(&self, m: &DMat3) -> Position {
        Position::new(self.boost, self.facing * *m)
    }

    /// Move along the geodesic with initial velocity `v`, expressed in the
    /// reference frame carried by the boost. The facing is parallel-transported.
    #[must_use]
    pub fn flow<G: GeometryModel + ?Sized>(&self, geom: &G, v: DVec3) -> Position {
        if v == DVec3::ZERO {
            return *self;
        }
        match geom.flow_strategy() {
            FlowStrategy::ClosedForm => {
                let shift = geom.translation_to(&geom.exp_origin(v));
                Position::new(geom.renormalize_isometry(&self.boost.multiply(&shift)), self.facing)
            }
            FlowStrategy::Euler { step } => {
                let (boost, facing, _) = euler_flow(geom, &self.boost, &self.facing, v, step);
                Position::new(boost, facing)
            }
        }
    }

    /// Move along `v` given in the observer's own (facing) frame.
    #[must_use]
    pub fn local_flow<G: GeometryModel + ?Sized>(&self, geom: &G, v: DVec3) -> Position {
        self.flow(geom, self.facing * v)
    }

    /// Project boost and facing back onto their groups.
    #[must_use]
    pub fn renormalize<G: GeometryModel + ?Sized>(&self, geom: &G) -> Position {
        Position::new(geom.renormalize_isometry(&self.boost), gram_schmidt(&self.facing))
    }

    /// Unit tangent the observer looks along.
    #[must_use]
    pub fn forward<G: GeometryModel + ?Sized>(&self, geom: &G) -> Vector {
        self.push_forward(geom, DVec3::NEG_Z)
    }

    #[must_use]
    pub fn right<G: GeometryModel + ?Sized>(&self, geom: &G) -> Vector {
        self.push_forward(geom, DVec3::X)
    }

    #[must_use]
    pub fn up<G: GeometryModel + ?Sized>(&self, geom: &G) -> Vector {
        self.push_forward(geom, DVec3::Y)
    }

    /// Push a direction of the observer's own frame to a tangent vector at
    /// the observer's location.
    #[must_use]
    pub fn push_forward<G: GeometryModel + ?Sized>(&self, geom: &G, local_dir: DVec3) -> Vector {
        apply_to_vector(geom, &self.boost, &Vector::at_origin(self.facing * local_dir))
    }
}
