#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::many_single_char_names)]
//! # Thurston geometry models
//!
//! The algebra the renderer is built on: isometries, points, tangent
//! vectors and observer positions for four of the eight Thurston
//! geometries, all encoded as 4x4 matrices and homogeneous 4-vectors in
//! `f64`.
//!
//! ## Key Components
//!
//! -   **Contract:** [`GeometryModel`] lists what a model must provide. The
//!     derived operations ([`apply_to_vector`], [`geodesic`],
//!     [`direction_to`], [`gradient`]) are written once against it.
//! -   **Models:** [`Euclidean`], [`Hyperbolic`] (hyperboloid model with
//!     Klein projection), [`Nil`] and [`Sol`] (left-invariant metrics on
//!     3-dimensional Lie groups).
//! -   **Observer:** [`Position`] pairs a boost with a facing and moves it
//!     along geodesics, in closed form or by Euler integration depending on
//!     the model's [`FlowStrategy`].
//! -   **Dispatch:** [`Geometry`] wraps the models for runtime selection
//!     from a [`GeometryKind`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geometry::{Geometry, GeometryKind, GeometryModel, Position};
//! use glam::DVec3;
//!
//! let geom = Geometry::from(GeometryKind::Hyperbolic);
//! let position = Position::IDENTITY.local_flow(&geom, DVec3::new(0.0, 0.0, -1.0));
//! println!("observer at {:?}", position.observer_point(&geom));
//! ```

pub mod euclidean;
pub mod flow;
pub mod hyperbolic;
pub mod isometry;
pub mod kind;
pub mod model;
pub mod nil;
pub mod point;
pub mod position;
pub mod sol;

pub use euclidean::Euclidean;
pub use flow::{euler_flow, gram_schmidt};
pub use hyperbolic::{lorentz_dot, Hyperbolic};
pub use isometry::Isometry;
pub use kind::{Geometry, GeometryKind, ParseGeometryError};
pub use model::{
    apply_to_point, apply_to_vector, direction_to, frame, geodesic, gradient, small_shift,
    FlowStrategy, GeometryModel, DEFAULT_EULER_STEP,
};
pub use nil::Nil;
pub use point::{Point, Vector};
pub use position::Position;
pub use sol::Sol;
